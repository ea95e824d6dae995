use acctreg_core::{Account, AccountStats, RefreshStatus};
use proptest::prelude::*;

fn arb_account() -> impl Strategy<Value = Account> {
    (
        any::<bool>(),
        prop::option::of(prop_oneof![
            Just(RefreshStatus::Success),
            Just(RefreshStatus::Failed)
        ]),
        0i64..50,
        0i64..50,
    )
        .prop_map(|(enabled, status, error_count, success_count)| Account {
            id: "id".to_string(),
            label: None,
            enabled,
            client_id: None,
            client_secret: None,
            refresh_token: None,
            access_token: None,
            other: None,
            last_refresh_time: None,
            last_refresh_status: status,
            error_count,
            success_count,
            created_at: "2024-01-01T00:00:00".to_string(),
            updated_at: "2024-01-01T00:00:00".to_string(),
        })
}

proptest! {
    #[test]
    fn stats_partition_enabled_and_disabled(accounts in prop::collection::vec(arb_account(), 0..40)) {
        let stats = AccountStats::from_accounts(&accounts);
        prop_assert_eq!(stats.total, accounts.len());
        prop_assert_eq!(stats.enabled + stats.disabled, stats.total);
        prop_assert!(stats.refresh_failed <= stats.total);
        prop_assert!(stats.never_used <= stats.total);
        prop_assert_eq!(
            stats.total_success_count,
            accounts.iter().map(|account| account.success_count).sum::<i64>()
        );
    }
}
