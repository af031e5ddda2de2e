//! Error taxonomy coverage: unique lookups, update exactness, enum
//! integrity, and structural precondition checks.

use rowmap::Statement;
use rowmap::prelude::*;
use rowmap_sqlite::SqliteConnection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SqlEnum)]
enum Tier {
    #[default]
    Alpha,
    Beta,
    Gamma,
}

#[derive(Debug, Clone, PartialEq, Default, Model)]
#[rowmap(table = "members")]
struct Member {
    #[rowmap(auto_increment)]
    id: Option<i64>,
    #[rowmap(unique)]
    name: String,
    tier: Tier,
}

// Declares `id` as its primary key, but the fixture table is created
// without any uniqueness so update can legitimately match several rows.
#[derive(Debug, Clone, PartialEq, Default, Model)]
#[rowmap(table = "pairs")]
struct Pair {
    #[rowmap(primary_key)]
    id: i64,
    label: String,
}

// No primary key at all; update/delete must fail before reaching SQL.
#[derive(Debug, Clone, PartialEq, Default, Model)]
#[rowmap(table = "memos")]
struct Memo {
    body: String,
}

// Two-column uniqueness group.
#[derive(Debug, Clone, PartialEq, Default, Model)]
#[rowmap(table = "holdings", unique(owner, symbol))]
struct Holding {
    #[rowmap(auto_increment)]
    id: Option<i64>,
    owner: i64,
    symbol: String,
    shares: f64,
}

fn member_connection() -> SqliteConnection {
    let conn = SqliteConnection::open_in_memory().unwrap();
    create_table::<Member, _>(&conn).unwrap();
    conn
}

fn member(name: &str, tier: Tier) -> Member {
    Member {
        id: None,
        name: name.to_string(),
        tier,
    }
}

#[test]
fn unique_lookup_returns_the_seeded_row() {
    let conn = member_connection();
    insert(&conn, &member("alice", Tier::Alpha)).unwrap();

    let found = get_by_unique(&conn, Member::NAME, &"alice".to_string()).unwrap();
    assert_eq!(found.name, "alice");
    assert_eq!(found.tier, Tier::Alpha);
}

#[test]
fn unique_lookup_miss_is_not_found() {
    let conn = member_connection();
    insert(&conn, &member("alice", Tier::Alpha)).unwrap();

    let err = get_by_unique(&conn, Member::NAME, &"bob".to_string()).unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound {
            table: "members",
            column: "name",
        }
    ));
}

#[test]
fn update_of_missing_row_is_no_rows_updated() {
    let conn = member_connection();

    let ghost = Member {
        id: Some(999),
        name: "ghost".to_string(),
        tier: Tier::Beta,
    };
    let err = update(&conn, &ghost).unwrap_err();
    assert!(matches!(err, Error::NoRowsUpdated { table: "members" }));
}

#[test]
fn update_matching_two_rows_is_multiple_rows_updated() {
    let conn = SqliteConnection::open_in_memory().unwrap();
    // Plain table: the model's declared key is not enforced here, so two
    // rows can share id 1.
    conn.execute("CREATE TABLE pairs (id INTEGER, label TEXT NOT NULL)")
        .unwrap();
    insert(
        &conn,
        &Pair {
            id: 1,
            label: "one".to_string(),
        },
    )
    .unwrap();
    insert(
        &conn,
        &Pair {
            id: 1,
            label: "two".to_string(),
        },
    )
    .unwrap();

    let err = update(
        &conn,
        &Pair {
            id: 1,
            label: "rewritten".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::MultipleRowsUpdated {
            table: "pairs",
            count: 2,
        }
    ));
}

#[test]
fn update_of_unique_row_succeeds_and_is_visible() {
    let conn = member_connection();
    let id = insert(&conn, &member("carol", Tier::Alpha)).unwrap();

    let changed = Member {
        id: Some(id),
        name: "carol".to_string(),
        tier: Tier::Gamma,
    };
    update(&conn, &changed).unwrap();

    let found = get_by_pk::<Member, _, _>(&conn, &id).unwrap().unwrap();
    assert_eq!(found, changed);
}

#[test]
fn enum_round_trips_by_symbolic_name() {
    let conn = member_connection();
    let id = insert(&conn, &member("beta holder", Tier::Beta)).unwrap();

    let found = get_by_pk::<Member, _, _>(&conn, &id).unwrap().unwrap();
    assert_eq!(found.tier, Tier::Beta);

    // Stored representation really is the symbolic name.
    let mut stmt = conn
        .prepare("SELECT tier FROM members WHERE id = ?")
        .unwrap();
    stmt.bind_i64(1, id).unwrap();
    stmt.step().unwrap();
    assert_eq!(stmt.column_text(0).unwrap(), "Beta");
}

#[test]
fn unknown_enum_name_is_an_error_never_a_default() {
    let conn = member_connection();
    conn.execute("INSERT INTO members (name, tier) VALUES ('corrupt', 'NotAValue')")
        .unwrap();

    let err = get_by_unique(&conn, Member::NAME, &"corrupt".to_string()).unwrap_err();
    match err {
        Error::InvalidEnumValue { enum_name, value } => {
            assert_eq!(enum_name, "Tier");
            assert_eq!(value, "NotAValue");
        }
        other => panic!("expected InvalidEnumValue, got {other:?}"),
    }
}

#[test]
fn no_primary_key_is_raised_for_update_and_delete() {
    // The memos table is never created: reaching the engine would fail
    // with a missing-table statement error, so getting NoPrimaryKey back
    // proves the check ran first.
    let conn = SqliteConnection::open_in_memory().unwrap();

    let memo = Memo {
        body: "unkeyed".to_string(),
    };
    assert!(matches!(
        update(&conn, &memo).unwrap_err(),
        Error::NoPrimaryKey { table: "memos" }
    ));
    assert!(matches!(
        delete_by_pk::<Memo, _, i64>(&conn, &1).unwrap_err(),
        Error::NoPrimaryKey { table: "memos" }
    ));
}

#[test]
fn multi_column_unique_group_is_enforced() {
    let conn = SqliteConnection::open_in_memory().unwrap();
    create_table::<Holding, _>(&conn).unwrap();

    let holding = Holding {
        id: None,
        owner: 1,
        symbol: "ROW".to_string(),
        shares: 10.0,
    };
    insert(&conn, &holding).unwrap();

    // Same owner, different symbol: fine.
    let mut other = holding.clone();
    other.symbol = "MAP".to_string();
    insert(&conn, &other).unwrap();

    // Same (owner, symbol) pair: rejected by the UNIQUE group.
    let err = insert(&conn, &holding).unwrap_err();
    assert!(matches!(err, Error::Statement { .. }));
}
