//! Caret-range compatibility between class versions
//!
//! Versions follow `MAJOR.MINOR.PATCH`. The caret range of a version narrows as
//! it approaches zero:
//! - `major >= 1`: any version with the same major
//! - `major == 0, minor >= 1`: same major and minor
//! - `major == 0, minor == 0`: same major, minor and patch

use semver::Version;

/// Check whether `candidate` falls inside the caret range of `base`.
fn in_caret_range(candidate: &Version, base: &Version) -> bool {
    if candidate < base {
        return false;
    }
    if base.major >= 1 {
        candidate.major == base.major
    } else if base.minor >= 1 {
        candidate.major == 0 && candidate.minor == base.minor
    } else {
        candidate.major == 0 && candidate.minor == 0 && candidate.patch == base.patch
    }
}

/// Symmetric caret compatibility: true when either version satisfies the
/// other's caret range.
pub fn caret_compatible(a: &Version, b: &Version) -> bool {
    in_caret_range(a, b) || in_caret_range(b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_same_major_compatible() {
        assert!(caret_compatible(&v("1.2.3"), &v("1.9.0")));
        assert!(caret_compatible(&v("2.0.0"), &v("2.5.1")));
        assert!(!caret_compatible(&v("1.9.0"), &v("2.0.0")));
    }

    #[test]
    fn test_zero_major_locks_minor() {
        assert!(caret_compatible(&v("0.1.0"), &v("0.1.5")));
        assert!(caret_compatible(&v("0.1.5"), &v("0.1.0")));
        assert!(!caret_compatible(&v("0.1.5"), &v("0.2.0")));
        assert!(!caret_compatible(&v("0.2.0"), &v("0.1.5")));
    }

    #[test]
    fn test_zero_minor_locks_patch() {
        assert!(caret_compatible(&v("0.0.3"), &v("0.0.3")));
        assert!(!caret_compatible(&v("0.0.3"), &v("0.0.4")));
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(
            caret_compatible(&v("1.2.0"), &v("1.0.0")),
            caret_compatible(&v("1.0.0"), &v("1.2.0"))
        );
    }

    #[test]
    fn test_equal_versions() {
        assert!(caret_compatible(&v("0.1.0"), &v("0.1.0")));
        assert!(caret_compatible(&v("3.1.4"), &v("3.1.4")));
    }
}
