//! The fixed catalog of time-reversible substitution-model symmetry patterns.
//!
//! Each pattern assigns one of K rate classes to the six exchangeability
//! parameters of a 4-state model. The catalog is ordered by ascending K, with
//! `GROUP_SIZES[K - 1]` patterns per class; the last entry is the fully
//! unconstrained GTR model.

/// Number of patterns in the catalog.
pub const CATALOG_SIZE: u32 = 203;

/// Patterns per free-parameter class, K = 1..=6.
pub const GROUP_SIZES: [u32; 6] = [1, 31, 90, 65, 15, 1];

/// Absolute index of the GTR pattern (`"012345"`).
pub const GTR_INDEX: u32 = 202;

#[rustfmt::skip]
static PATTERNS: [&str; CATALOG_SIZE as usize] = [
    // K = 1
    "000000",
    // K = 2
    "011111", "010000", "001000", "000100", "000010",
    "000001", "001111", "010111", "011011", "011101",
    "011110", "011000", "010100", "010010", "010001",
    "001100", "001010", "001001", "000110", "000101",
    "000011", "000111", "001011", "001101", "001110",
    "010011", "010101", "010110", "011001", "011010",
    "011100",
    // K = 3
    "012222", "012111", "011211", "011121", "011112",
    "012000", "010200", "010020", "010002", "001200",
    "001020", "001002", "000120", "000102", "000012",
    "011222", "012122", "012212", "012221", "012211",
    "012121", "012112", "011221", "011212", "011122",
    "010222", "012022", "012202", "012220", "001222",
    "001211", "001121", "001112", "012011", "012101",
    "012110", "010211", "010121", "010112", "011201",
    "011210", "011021", "011012", "011120", "011102",
    "012200", "012020", "012002", "010220", "010202",
    "010022", "012100", "012010", "012001", "011200",
    "011020", "011002", "010210", "010201", "010120",
    "010102", "010021", "010012", "001220", "001202",
    "001022", "001210", "001201", "001120", "001102",
    "001021", "001012", "000122", "000121", "000112",
    "001122", "001212", "001221", "010122", "010212",
    "010221", "011022", "011202", "011220", "012012",
    "012021", "012102", "012120", "012201", "012210",
    // K = 4
    "012333", "012322", "012232", "012223", "012311",
    "012131", "012113", "011231", "011213", "011123",
    "012300", "012030", "012003", "010230", "010203",
    "010023", "001230", "001203", "001023", "000123",
    "012233", "012323", "012332", "012133", "012313",
    "012331", "011233", "011232", "011223", "012312",
    "012321", "012132", "012123", "012231", "012213",
    "012033", "012303", "012330", "010233", "010232",
    "010223", "012302", "012320", "012032", "012023",
    "012230", "012203", "001233", "001232", "001223",
    "001231", "001213", "001123", "012301", "012310",
    "012031", "012013", "012130", "012103", "010231",
    "010213", "010123", "011230", "011203", "011023",
    // K = 5
    "012344", "012343", "012334", "012342", "012324",
    "012234", "012341", "012314", "012134", "011234",
    "012340", "012304", "012034", "010234", "001234",
    // K = 6
    "012345",
];

/// Look up the symmetry pattern for an absolute catalog index.
///
/// Callers are expected to stay within the catalog; the bound is enforced
/// when a model space is constructed.
pub fn pattern(absolute: u32) -> &'static str {
    PATTERNS[absolute as usize]
}

/// The free-parameter class K (1..=6) of an absolute catalog index.
pub fn parameter_class(absolute: u32) -> u32 {
    let mut index = absolute;
    for (k, &count) in GROUP_SIZES.iter().enumerate() {
        if index < count {
            return k as u32 + 1;
        }
        index -= count;
    }
    unreachable!("index {absolute} outside the catalog")
}

/// Comma-separated form of a pattern, as consumed by evaluator backends
/// (`"012345"` becomes `"0,1,2,3,4,5"`).
pub fn pattern_grouped(absolute: u32) -> String {
    let mut out = String::with_capacity(11);
    for (i, c) in pattern(absolute).chars().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_sizes_sum_to_catalog() {
        assert_eq!(GROUP_SIZES.iter().sum::<u32>(), CATALOG_SIZE);
    }

    #[test]
    fn test_parameter_class_boundaries() {
        assert_eq!(parameter_class(0), 1);
        assert_eq!(parameter_class(1), 2);
        assert_eq!(parameter_class(31), 2);
        assert_eq!(parameter_class(32), 3);
        assert_eq!(parameter_class(121), 3);
        assert_eq!(parameter_class(122), 4);
        assert_eq!(parameter_class(186), 4);
        assert_eq!(parameter_class(187), 5);
        assert_eq!(parameter_class(201), 5);
        assert_eq!(parameter_class(202), 6);
    }

    #[test]
    fn test_class_matches_distinct_digits() {
        for i in 0..CATALOG_SIZE {
            let distinct: std::collections::HashSet<char> = pattern(i).chars().collect();
            assert_eq!(
                distinct.len() as u32,
                parameter_class(i),
                "pattern {} ({})",
                i,
                pattern(i)
            );
        }
    }

    #[test]
    fn test_gtr_is_last() {
        assert_eq!(pattern(GTR_INDEX), "012345");
        assert_eq!(GTR_INDEX, CATALOG_SIZE - 1);
    }

    #[test]
    fn test_patterns_unique() {
        let set: std::collections::HashSet<&str> = PATTERNS.iter().copied().collect();
        assert_eq!(set.len(), CATALOG_SIZE as usize);
    }

    #[test]
    fn test_pattern_grouped() {
        assert_eq!(pattern_grouped(GTR_INDEX), "0,1,2,3,4,5");
        assert_eq!(pattern_grouped(0), "0,0,0,0,0,0");
    }
}
