//! Build-time validation of the crate's static tables.
//!
//! These checks run during constant evaluation, so a mis-ordered zone table
//! or a mismatched name pair becomes a compile error instead of a silent
//! lookup failure.

/// Checks that a name-keyed table is strictly ascending, as binary search
/// requires.
pub(crate) const fn sorted_by_name<'a, T>(table: &'a [(&'a str, T)]) -> &'a [(&'a str, T)] {
    let mut entry = 1;
    while entry < table.len() {
        assert!(name_precedes(table[entry - 1].0, table[entry].0));
        entry += 1;
    }
    table
}

/// Byte-wise strict ordering of two names.
const fn name_precedes(left: &str, right: &str) -> bool {
    let (left, right) = (left.as_bytes(), right.as_bytes());
    let shorter = if left.len() < right.len() {
        left.len()
    } else {
        right.len()
    };
    let mut i = 0;
    while i < shorter {
        if left[i] != right[i] {
            return left[i] < right[i];
        }
        i += 1;
    }
    left.len() < right.len()
}

/// Checks that every entry pairs an ASCII name with its exact upper-case
/// form.
pub(crate) const fn matching_case_pairs(pairs: &[(&str, &str)]) {
    let mut entry = 0;
    while entry < pairs.len() {
        let (name, upper) = (pairs[entry].0.as_bytes(), pairs[entry].1.as_bytes());
        assert!(name.len() == upper.len());
        let mut i = 0;
        while i < name.len() {
            assert!(name[i].is_ascii());
            assert!(upper[i] == name[i].to_ascii_uppercase());
            i += 1;
        }
        entry += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::name_precedes;

    #[test]
    fn test_name_precedes() {
        assert!(name_precedes("CDT", "CET"));
        assert!(name_precedes("Z", "ZP4"));
        assert!(name_precedes("E. AFRICA", "EADT"));
        assert!(!name_precedes("ZP4", "Z"));
        assert!(!name_precedes("PST", "PST"));
    }
}
