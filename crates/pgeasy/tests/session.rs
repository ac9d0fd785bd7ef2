//! Round trips against a real database.
//!
//! These tests only run when `DATABASE_URL` is set; otherwise they return early.

use pgeasy::{
    EasyError, EasyResult, FromRow, RowExt, Session, TransactionError, delete, insert, select,
    update, values,
};
use tokio_postgres::Row;

async fn try_connect() -> Option<Session<tokio_postgres::Client>> {
    let _ = dotenvy::dotenv();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    Some(
        pgeasy::connect(&database_url)
            .await
            .expect("Failed to connect to DATABASE_URL with NoTls"),
    )
}

#[derive(Debug, PartialEq)]
struct Person {
    name: String,
    shows: i32,
}

impl FromRow for Person {
    fn from_row(row: &Row) -> EasyResult<Self> {
        Ok(Self {
            name: row.try_get_column("name")?,
            shows: row.try_get_column("shows")?,
        })
    }
}

async fn setup(session: &Session<tokio_postgres::Client>, table: &str) {
    session
        .execute_sql(&format!(
            "CREATE TEMP TABLE {table} (id SERIAL PRIMARY KEY, name TEXT NOT NULL, shows INT NOT NULL)"
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn insert_select_update_delete() {
    let Some(session) = try_connect().await else {
        return;
    };
    setup(&session, "pgeasy_people").await;

    let inserted = session
        .execute(insert(values! { "name" => "O'Brien", "shows" => 12 }).into("pgeasy_people"))
        .await
        .unwrap();
    assert_eq!(inserted, 1);
    session
        .execute(insert(values! { "name" => r"back\slash", "shows" => 3 }).into("pgeasy_people"))
        .await
        .unwrap();

    let people: Vec<Person> = session
        .fetch_as(
            select(["name", "shows"])
                .from("pgeasy_people")
                .where_("shows", ">", 10),
        )
        .await
        .unwrap();
    assert_eq!(
        people,
        vec![Person {
            name: "O'Brien".to_string(),
            shows: 12
        }]
    );

    let escaped: Person = session
        .fetch_one_as(
            select(["name", "shows"])
                .from("pgeasy_people")
                .where_("name", "=", r"back\slash"),
        )
        .await
        .unwrap();
    assert_eq!(escaped.shows, 3);

    let updated = session
        .execute(
            update([("shows", 13)])
                .where_("name", "=", "O'Brien")
                .from("pgeasy_people"),
        )
        .await
        .unwrap();
    assert_eq!(updated, 1);

    let deleted = session
        .execute(delete().from("pgeasy_people").where_("shows", "<", 100))
        .await
        .unwrap();
    assert_eq!(deleted, 2);
}

#[tokio::test]
async fn rollback_discards_changes() {
    let Some(mut session) = try_connect().await else {
        return;
    };
    setup(&session, "pgeasy_rollback").await;

    session.begin_transaction().await.unwrap();
    session
        .execute(insert(values! { "name" => "temp", "shows" => 1 }).into("pgeasy_rollback"))
        .await
        .unwrap();
    session.rollback_transaction().await.unwrap();

    let rows = session
        .query(select(["id"]).from("pgeasy_rollback"))
        .await
        .unwrap();
    assert!(rows.is_empty());

    let err = session.commit_transaction().await.unwrap_err();
    assert!(matches!(
        err,
        EasyError::Transaction(TransactionError::NoActiveTransaction)
    ));
}

#[tokio::test]
async fn driver_error_is_preserved() {
    let Some(session) = try_connect().await else {
        return;
    };
    let err = session
        .query(select(["id"]).from("pgeasy_table_that_does_not_exist"))
        .await
        .unwrap_err();
    let EasyError::Query(db_err) = err else {
        panic!("expected a driver error, got {err:?}");
    };
    assert!(db_err.as_db_error().is_some());
}
