//! Integration tests for `DieselHitRepository` against embedded PostgreSQL.
//!
//! Each test migrates a fresh database with the embedded migrations, then
//! checks identifier assignment, the inclusive window, URI filtering and the
//! statistics read path end to end.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use stats_backend::domain::ports::{
    HitRepository, HitRepositoryError, HitStatsQuery, HitStatsRequest,
};
use stats_backend::domain::{
    AggregateRow, HitDraft, HitEvent, HitId, HitStatsService, NewHit, TimeWindow, UriFilter,
};
use stats_backend::outbound::persistence::{
    DbPool, DieselHitRepository, PoolConfig, run_migrations,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

mod support;

use support::{execute, handle_cluster_setup_failure, reset_database, test_cluster};

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselHitRepository,
    database_url: String,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let db_name = format!("hits_{}", Uuid::new_v4().simple());
    let database_url = reset_database(&cluster, &db_name)?;
    runtime
        .block_on(run_migrations(&database_url))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository: DieselHitRepository::new(pool),
        database_url,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .expect("valid fixture timestamp")
}

fn hit(uri: &str, ip: &str, timestamp: NaiveDateTime) -> NewHit {
    NewHit::new(HitDraft {
        app: "ewm-main".to_owned(),
        uri: uri.to_owned(),
        ip: ip.to_owned(),
        timestamp: Some(timestamp),
    })
    .expect("valid hit")
}

fn window(start: NaiveDateTime, end: NaiveDateTime) -> TimeWindow {
    TimeWindow::new(start, end, at(23, 59, 59)).expect("valid window")
}

fn uris_of(events: &[HitEvent]) -> Vec<&str> {
    events.iter().map(|event| event.uri.as_str()).collect()
}

#[rstest]
fn appends_receive_increasing_identifiers(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: appends_receive_increasing_identifiers skipped");
        return;
    };

    let repository = context.repository.clone();
    let stored = context.runtime.block_on(async {
        let mut stored = Vec::new();
        for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.1"] {
            stored.push(
                repository
                    .append(&hit("/events/1", ip, at(10, 0, 0)))
                    .await
                    .expect("append hit"),
            );
        }
        stored
    });

    let ids: Vec<HitId> = stored.iter().map(|event| event.id).collect();
    assert!(
        ids.windows(2).all(|pair| pair[0] < pair[1]),
        "ids must increase: {ids:?}"
    );
    assert_eq!(stored[1].ip, "10.0.0.2");
    assert_eq!(stored[2].timestamp, at(10, 0, 0));
}

#[rstest]
fn window_bounds_are_inclusive(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: window_bounds_are_inclusive skipped");
        return;
    };

    let repository = context.repository.clone();
    let selected = context.runtime.block_on(async {
        for (uri, timestamp) in [
            ("/before", at(9, 59, 59)),
            ("/start", at(10, 0, 0)),
            ("/inside", at(10, 30, 0)),
            ("/end", at(11, 0, 0)),
            ("/after", at(11, 0, 1)),
        ] {
            repository
                .append(&hit(uri, "10.0.0.1", timestamp))
                .await
                .expect("append hit");
        }
        repository
            .select_in_range(
                &window(at(10, 0, 0), at(11, 0, 0)),
                &UriFilter::unrestricted(),
            )
            .await
            .expect("select hits")
    });

    assert_eq!(uris_of(&selected), vec!["/start", "/inside", "/end"]);
}

#[rstest]
fn uri_filter_matches_verbatim_members_only(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: uri_filter_matches_verbatim_members_only skipped");
        return;
    };

    let repository = context.repository.clone();
    let selected = context.runtime.block_on(async {
        for uri in ["/events", "/events/1", "/events/1/", "/events/2"] {
            repository
                .append(&hit(uri, "10.0.0.1", at(10, 0, 0)))
                .await
                .expect("append hit");
        }
        repository
            .select_in_range(
                &window(at(9, 0, 0), at(11, 0, 0)),
                &UriFilter::from_entries(["/events/2", "/events/1"]),
            )
            .await
            .expect("select hits")
    });

    assert_eq!(uris_of(&selected), vec!["/events/1", "/events/2"]);
}

#[rstest]
fn stats_service_counts_scenario_over_postgres(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: stats_service_counts_scenario_over_postgres skipped");
        return;
    };

    let repository = Arc::new(context.repository.clone());
    let service = HitStatsService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    let request = |unique| HitStatsRequest {
        start: at(0, 0, 0),
        end: at(23, 59, 59),
        uris: Vec::new(),
        unique,
    };

    let (total, unique) = context.runtime.block_on(async {
        for (ip, timestamp) in [
            ("10.0.0.1", at(10, 0, 0)),
            ("10.0.0.1", at(10, 0, 0)),
            ("10.0.0.2", at(10, 5, 0)),
        ] {
            repository
                .append(&hit("/events/1", ip, timestamp))
                .await
                .expect("append hit");
        }
        let total = service.stats(request(false)).await.expect("total stats");
        let unique = service.stats(request(true)).await.expect("unique stats");
        (total, unique)
    });

    let row = |hits| AggregateRow {
        app: "ewm-main".to_owned(),
        uri: "/events/1".to_owned(),
        hits,
    };
    assert_eq!(total.rows, vec![row(3)]);
    assert_eq!(unique.rows, vec![row(2)]);
}

#[rstest]
fn missing_table_is_a_query_error(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: missing_table_is_a_query_error skipped");
        return;
    };

    execute(&context.database_url, "DROP TABLE hits").expect("drop hits table");

    let repository = context.repository.clone();
    let error = context
        .runtime
        .block_on(repository.append(&hit("/events/1", "10.0.0.1", at(10, 0, 0))))
        .expect_err("append should fail without the table");

    assert!(matches!(error, HitRepositoryError::Query { .. }));
}
