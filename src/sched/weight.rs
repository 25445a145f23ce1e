//! Nice-value to scheduling-weight mapping.
//!
//! Reference table from Linux's `sched_prio_to_weight`. Nice levels are
//! multiplicative, with a gentle 10% change for every nice level changed:
//! a CPU-bound task at nice 1 gets ~10% less CPU time than one at nice 0.

/// Weight of a task at nice value 0. Used as the numerator when translating
/// an actually-consumed duration into virtual runtime.
pub const NICE_0_WEIGHT: u32 = 1024;

#[rustfmt::skip]
const NICE_TO_WEIGHT: [u32; 40] = [
   /* -20 */ 88761, 71755, 56483, 46273, 36291,
   /* -15 */ 29154, 23254, 18705, 14949, 11916,
   /* -10 */  9548,  7620,  6100,  4904,  3906,
   /*  -5 */  3121,  2501,  1991,  1586,  1277,
   /*   0 */  1024,   820,   655,   526,   423,
   /*   5 */   335,   272,   215,   172,   137,
   /*  10 */   110,    87,    70,    56,    45,
   /*  15 */    36,    29,    23,    18,    15,
];

/// Convert a nice value to its scheduling weight.
///
/// The caller (the workload parser) is responsible for clamping `nice` to
/// `[-20, 19]`; this function asserts the precondition instead of silently
/// clamping, since a violation at this layer is a programmer error, not a
/// recoverable input error.
#[inline]
pub fn nice_to_weight(nice: i8) -> u32 {
    debug_assert!((-20..=19).contains(&nice), "nice value {nice} out of range");
    NICE_TO_WEIGHT[(nice as i32 + 20) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_zero_is_base_weight() {
        assert_eq!(nice_to_weight(0), NICE_0_WEIGHT);
    }

    #[test]
    fn lower_nice_is_higher_weight() {
        assert!(nice_to_weight(-20) > nice_to_weight(0));
        assert!(nice_to_weight(0) > nice_to_weight(19));
    }

    #[test]
    fn table_is_monotonically_decreasing() {
        for pair in (-20i8..=19).collect::<Vec<_>>().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(nice_to_weight(a) >= nice_to_weight(b), "{a} -> {b}");
        }
    }

    #[test]
    fn endpoints_match_canonical_table() {
        assert_eq!(nice_to_weight(-20), 88761);
        assert_eq!(nice_to_weight(19), 15);
    }
}
