use proptest::prelude::*;

use accrue_types::{Principal, PrincipalKind, Timestamp};

proptest! {
    /// Any lowercase alphanumeric body behind the prefix is a standard principal.
    #[test]
    fn standard_bodies_parse(body in "[a-z0-9]{1,64}") {
        let p = Principal::parse(format!("acct_{body}")).unwrap();
        prop_assert_eq!(p.kind(), PrincipalKind::Standard);
    }

    /// A valid contract suffix always yields a contract principal.
    #[test]
    fn contract_suffix_is_never_standard(
        body in "[a-z0-9]{1,64}",
        name in "[a-z0-9-]{1,40}",
    ) {
        let p = Principal::parse(format!("acct_{body}.{name}")).unwrap();
        prop_assert!(!p.is_standard());
    }

    /// Strings lacking the prefix are rejected whatever follows.
    #[test]
    fn missing_prefix_always_rejected(s in "[a-z0-9]{0,40}") {
        prop_assert!(Principal::parse(s).is_err());
    }

    /// elapsed_since is the saturating difference.
    #[test]
    fn elapsed_is_saturating(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        prop_assert_eq!(ta.elapsed_since(Timestamp::new(b)), b.saturating_sub(a));
    }
}
