//! Service tests over the in-memory store
//!
//! These exercise the core services (ledger, baseline selector, comparator,
//! pool allocator) against real repositories.

use async_trait::async_trait;
use fueleu_core::{
    BankingBasis, BankingLedger, BaselineSelector, ComplianceCalculator, ComplianceError,
    ComplianceResult, PoolAllocator, PoolMemberRef, Route, RouteComparator, RouteFilter, RouteKey,
    RouteRepository,
};
use fueleu_store::{FuelEuDatabase, MemoryRouteRepository};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

async fn seeded_db() -> FuelEuDatabase {
    let db = FuelEuDatabase::in_memory();
    db.seed_demo().await.unwrap();
    db
}

fn ledger_for(db: &FuelEuDatabase) -> BankingLedger {
    let calculator = ComplianceCalculator::new(db.route_repository());
    BankingLedger::new(db.ledger_repository(), calculator)
}

async fn baseline_keys(routes: &dyn RouteRepository) -> Vec<RouteKey> {
    routes
        .list(&RouteFilter::all())
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.is_baseline)
        .map(|r| r.key())
        .collect()
}

// ============ Compliance Tests ============

#[tokio::test]
async fn test_route_compliance_uses_prior_year_baseline() {
    let db = seeded_db().await;
    let calculator = ComplianceCalculator::new(db.route_repository());

    let result = calculator.route_compliance("R2", 2024).await.unwrap();

    assert_eq!(result.baseline_route_id, "R3");
    assert_eq!(result.baseline_year, 2023);
    // (50.2 - 62.1) * 600.8
    assert_eq!(result.balance.cb, dec!(-7149.52));
    assert!(!result.balance.compliant);
}

#[tokio::test]
async fn test_route_compliance_unknown_route() {
    let db = seeded_db().await;
    let calculator = ComplianceCalculator::new(db.route_repository());

    let err = calculator.route_compliance("R9", 2024).await.unwrap_err();
    assert!(matches!(err, ComplianceError::RouteNotFound { .. }));
}

#[tokio::test]
async fn test_route_compliance_without_applicable_baseline() {
    let db = FuelEuDatabase::in_memory();
    db.seed(vec![Route::new("R1", 2024).with_ghg_intensity(dec!(75.4))])
        .await
        .unwrap();
    let calculator = ComplianceCalculator::new(db.route_repository());

    let err = calculator.route_compliance("R1", 2024).await.unwrap_err();
    assert!(matches!(err, ComplianceError::BaselineNotFound { year: Some(2024) }));
}

#[tokio::test]
async fn test_target_compliance() {
    let db = seeded_db().await;
    let calculator = ComplianceCalculator::new(db.route_repository());

    let result = calculator.target_compliance("R2", 2024).await.unwrap();
    // (89.3368 - 62.1) * 900.3 * 41000
    assert_eq!(result.cb, dec!(1005372932.64));
    assert!(result.is_surplus());
}

// ============ Comparison Tests ============

#[tokio::test]
async fn test_compare_all_excludes_baseline() {
    let db = seeded_db().await;
    let comparator = RouteComparator::new(db.route_repository());

    let result = comparator.compare_all().await.unwrap();

    assert_eq!(result.baseline.route_id, "R3");
    assert_eq!(result.comparison.len(), 2);
    assert!(result.comparison.iter().all(|c| c.route_id != "R3"));

    let r2 = result.comparison.iter().find(|c| c.route_id == "R2").unwrap();
    assert_eq!(r2.percent_diff, dec!(23.71));
    assert!(!r2.compliant);
}

#[tokio::test]
async fn test_compare_all_without_baseline() {
    let db = FuelEuDatabase::in_memory();
    db.seed(vec![Route::new("R1", 2024)]).await.unwrap();
    let comparator = RouteComparator::new(db.route_repository());

    let err = comparator.compare_all().await.unwrap_err();
    assert!(matches!(err, ComplianceError::BaselineNotFound { year: None }));
}

// ============ Baseline Tests ============

#[tokio::test]
async fn test_set_baseline_twice_leaves_single_flag() {
    let db = seeded_db().await;
    let selector = BaselineSelector::new(db.route_repository());

    selector.set_baseline("R1").await.unwrap();
    selector.set_baseline("R2").await.unwrap();

    let keys = baseline_keys(db.routes.as_ref()).await;
    assert_eq!(keys, vec![RouteKey::new("R2", 2024)]);
    assert_eq!(selector.current().await.unwrap().unwrap().route_id, "R2");
}

#[tokio::test]
async fn test_set_baseline_unknown_keeps_previous() {
    let db = seeded_db().await;
    let selector = BaselineSelector::new(db.route_repository());

    let err = selector.set_baseline("R9").await.unwrap_err();
    assert!(matches!(err, ComplianceError::RouteNotFound { .. }));
    assert_eq!(baseline_keys(db.routes.as_ref()).await, vec![RouteKey::new("R3", 2023)]);
}

#[tokio::test]
async fn test_set_baseline_rejects_blank_id() {
    let db = seeded_db().await;
    let selector = BaselineSelector::new(db.route_repository());

    let err = selector.set_baseline("  ").await.unwrap_err();
    assert!(matches!(err, ComplianceError::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_concurrent_set_baseline() {
    let db = seeded_db().await;
    let selector = BaselineSelector::new(db.route_repository());

    let handles: Vec<_> = ["R1", "R2", "R3", "R1", "R2"]
        .into_iter()
        .map(|id| {
            let selector = selector.clone();
            tokio::spawn(async move { selector.set_baseline(id).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(baseline_keys(db.routes.as_ref()).await.len(), 1);
}

/// Route store whose `mark_baseline` always fails, running the default
/// clear-then-set path of `replace_baseline`
struct FailingMarkRepository {
    inner: MemoryRouteRepository,
}

#[async_trait]
impl RouteRepository for FailingMarkRepository {
    async fn create(&self, route: Route) -> ComplianceResult<Route> {
        self.inner.create(route).await
    }

    async fn find(&self, route_id: &str, year: i32) -> ComplianceResult<Option<Route>> {
        self.inner.find(route_id, year).await
    }

    async fn find_by_route_id(&self, route_id: &str) -> ComplianceResult<Vec<Route>> {
        self.inner.find_by_route_id(route_id).await
    }

    async fn list(&self, filter: &RouteFilter) -> ComplianceResult<Vec<Route>> {
        self.inner.list(filter).await
    }

    async fn current_baseline(&self) -> ComplianceResult<Option<Route>> {
        self.inner.current_baseline().await
    }

    async fn clear_baselines(&self) -> ComplianceResult<Vec<RouteKey>> {
        self.inner.clear_baselines().await
    }

    async fn mark_baseline(&self, _key: &RouteKey) -> ComplianceResult<Route> {
        Err(ComplianceError::storage("write rejected"))
    }

    async fn restore_baselines(&self, keys: &[RouteKey]) -> ComplianceResult<()> {
        self.inner.restore_baselines(keys).await
    }
}

#[tokio::test]
async fn test_failed_designation_restores_previous_baseline() {
    let repo = FailingMarkRepository {
        inner: MemoryRouteRepository::new(),
    };
    for route in fueleu_store::demo_routes() {
        repo.create(route).await.unwrap();
    }
    let repo = Arc::new(repo);
    let selector = BaselineSelector::new(repo.clone());

    let err = selector.set_baseline("R2").await.unwrap_err();

    assert!(err.to_string().contains("write rejected"));
    assert_eq!(baseline_keys(repo.as_ref()).await, vec![RouteKey::new("R3", 2023)]);
}

// ============ Banking Tests ============

#[tokio::test]
async fn test_bank_then_apply() {
    let db = seeded_db().await;
    let ledger = ledger_for(&db);

    let credit = ledger.bank("R2", 2024).await.unwrap();
    assert_eq!(credit.credit, dec!(1005372932.64));
    assert_eq!(credit.balance, credit.credit);

    let debit = ledger.apply("R2", dec!(5372932.64)).await.unwrap();
    assert_eq!(debit.balance, dec!(1000000000));
    assert_eq!(ledger.get_balance("R2").await.unwrap(), dec!(1000000000));

    let records = ledger.records("R2").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, credit.id);
    assert_eq!(records[1].id, debit.id);
}

#[tokio::test]
async fn test_apply_entire_banked_amount_empties_balance() {
    let db = seeded_db().await;
    let ledger = ledger_for(&db);

    let credit = ledger.bank("R2", 2024).await.unwrap();
    let debit = ledger.apply("R2", credit.credit).await.unwrap();

    assert_eq!(debit.debit, credit.credit);
    assert_eq!(debit.balance, Decimal::ZERO);
    assert_eq!(ledger.get_balance("R2").await.unwrap(), Decimal::ZERO);

    // Nothing left to spend
    let err = ledger.apply("R2", dec!(0.01)).await.unwrap_err();
    assert!(matches!(err, ComplianceError::InsufficientBalance { .. }));
}

#[tokio::test]
async fn test_bank_huge_fuel_consumption_overflows() {
    let db = FuelEuDatabase::in_memory();
    db.seed(vec![Route::new("BIG", 2024)
        .with_ghg_intensity(dec!(62.1))
        .with_fuel_consumption(Decimal::from_i128_with_scale(10_i128.pow(25), 0))])
        .await
        .unwrap();
    let ledger = ledger_for(&db);

    let err = ledger.bank("BIG", 2024).await.unwrap_err();
    assert!(matches!(err, ComplianceError::BalanceOverflow { ref route_id } if route_id == "BIG"));
    assert!(ledger.records("BIG").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bank_balance_overflow_leaves_ledger_unchanged() {
    let db = FuelEuDatabase::in_memory();
    // CB of about 5e28 fits once, not twice
    db.seed(vec![Route::new("BIG", 2024)
        .with_ghg_intensity(dec!(62.1))
        .with_fuel_consumption(Decimal::from_i128_with_scale(45 * 10_i128.pow(21), 0))])
        .await
        .unwrap();
    let ledger = ledger_for(&db);

    let first = ledger.bank("BIG", 2024).await.unwrap();
    let err = ledger.bank("BIG", 2024).await.unwrap_err();

    assert!(matches!(err, ComplianceError::BalanceOverflow { .. }));
    assert_eq!(ledger.records("BIG").await.unwrap().len(), 1);
    assert_eq!(ledger.get_balance("BIG").await.unwrap(), first.balance);
}

#[tokio::test]
async fn test_balance_of_unknown_route_is_zero() {
    let db = seeded_db().await;
    let ledger = ledger_for(&db);
    assert_eq!(ledger.get_balance("R9").await.unwrap(), Decimal::ZERO);
}

#[tokio::test]
async fn test_bank_deficit_rejected() {
    let db = FuelEuDatabase::in_memory();
    db.seed(vec![Route::new("R4", 2024)
        .with_ghg_intensity(dec!(95.0))
        .with_fuel_consumption(dec!(100))])
        .await
        .unwrap();
    let ledger = ledger_for(&db);

    let err = ledger.bank("R4", 2024).await.unwrap_err();
    assert!(matches!(err, ComplianceError::NoSurplus { .. }));
    assert!(ledger.records("R4").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bank_baseline_relative_deficit_rejected() {
    let db = seeded_db().await;
    let ledger = ledger_for(&db).with_basis(BankingBasis::BaselineRelative);

    // R2 is more intensive than the R3 baseline
    let err = ledger.bank("R2", 2024).await.unwrap_err();
    assert!(matches!(err, ComplianceError::NoSurplus { .. }));
}

#[tokio::test]
async fn test_apply_insufficient_leaves_ledger_unchanged() {
    let db = seeded_db().await;
    let ledger = ledger_for(&db);
    ledger.bank("R2", 2024).await.unwrap();

    let err = ledger.apply("R2", dec!(2000000000)).await.unwrap_err();
    assert!(matches!(err, ComplianceError::InsufficientBalance { .. }));
    assert_eq!(ledger.records("R2").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_apply_rejects_non_positive_amount() {
    let db = seeded_db().await;
    let ledger = ledger_for(&db);

    for amount in [Decimal::ZERO, dec!(-1)] {
        let err = ledger.apply("R2", amount).await.unwrap_err();
        assert!(matches!(err, ComplianceError::NonPositiveAmount { .. }));
    }
}

#[tokio::test]
async fn test_concurrent_apply_never_overdraws() {
    let db = seeded_db().await;
    let ledger = ledger_for(&db);
    ledger.bank("R2", 2024).await.unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.apply("R2", dec!(200000000)).await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            succeeded += 1;
        }
    }

    assert_eq!(succeeded, 5);
    assert_eq!(ledger.get_balance("R2").await.unwrap(), dec!(5372932.64));
}

#[tokio::test]
async fn test_reset_clears_balances() {
    let db = seeded_db().await;
    let ledger = ledger_for(&db);
    ledger.bank("R1", 2024).await.unwrap();
    ledger.bank("R2", 2024).await.unwrap();

    assert_eq!(ledger.reset().await.unwrap(), 2);
    assert_eq!(ledger.get_balance("R1").await.unwrap(), Decimal::ZERO);
}

// ============ Pooling Tests ============

#[tokio::test]
async fn test_create_pool_conserves_total() {
    let db = seeded_db().await;
    let allocator = PoolAllocator::new(db.route_repository(), db.pool_repository());

    let pool = allocator
        .create_pool(2024, &[PoolMemberRef::new("R1"), PoolMemberRef::new("R2")])
        .await
        .unwrap();

    // 111522.2736 + 163638.6944
    assert_eq!(pool.total_cb, dec!(275160.968));
    assert_eq!(pool.sum_after(), pool.total_cb);
    assert_eq!(pool.members[1].ship, "Tanker");

    let listed = allocator.list_pools(Some(2024)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, pool.id);
}

#[tokio::test]
async fn test_pool_member_falls_back_to_latest_record() {
    let db = seeded_db().await;
    let allocator = PoolAllocator::new(db.route_repository(), db.pool_repository());

    // R3 only exists for 2023
    let pool = allocator
        .create_pool(2024, &[PoolMemberRef::new("R2"), PoolMemberRef::new("R3")])
        .await
        .unwrap();
    assert_eq!(pool.members.len(), 2);
}

#[tokio::test]
async fn test_pool_unknown_member() {
    let db = seeded_db().await;
    let allocator = PoolAllocator::new(db.route_repository(), db.pool_repository());

    let err = allocator
        .create_pool(2024, &[PoolMemberRef::new("R1"), PoolMemberRef::new("R9")])
        .await
        .unwrap_err();
    assert!(matches!(err, ComplianceError::RouteNotFound { .. }));
    assert!(allocator.list_pools(None).await.unwrap().is_empty());
}
