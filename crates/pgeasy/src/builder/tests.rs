use super::*;
use crate::query::StatementKind;
use serde_json::json;

#[test]
fn test_select_fields() {
    let qb = select(["a", "b"]).from("t");
    assert!(qb.to_sql().contains("SELECT a, b FROM t"));
    assert_eq!(qb.to_sql(), "SELECT a, b FROM t");
}

#[test]
fn test_select_star_when_no_fields() {
    assert_eq!(select(Vec::<String>::new()).from("t").to_sql(), "SELECT * FROM t");
    assert_eq!(QueryBuilder::new().select_all().from("t").to_sql(), "SELECT * FROM t");
}

#[test]
fn test_from_appends_tables() {
    let qb = QueryBuilder::new().select_all().from("a").from("b");
    assert_eq!(qb.to_sql(), "SELECT * FROM a, b");
}

#[test]
fn test_into_replaces_tables() {
    let qb = insert([("x", 1)]).from("a").from("b").into("c");
    assert_eq!(qb.as_query().tables, vec!["c".to_string()]);
    assert_eq!(qb.to_sql(), "INSERT INTO c (x) VALUES (1)");
}

#[test]
fn test_update_example() {
    let sql = update([("name", "Zayne")])
        .where_("name", "=", "Sean")
        .from("users")
        .to_sql();
    assert_eq!(sql, "UPDATE users SET name = 'Zayne' WHERE name = 'Sean'");
}

#[test]
fn test_insert_example() {
    let sql = insert(crate::values! { "a" => 1, "b" => "x" }).into("t").to_sql();
    assert_eq!(sql, "INSERT INTO t (a, b) VALUES (1, 'x')");
}

#[test]
fn test_insert_json_keeps_member_order() {
    let sql = QueryBuilder::new()
        .insert_json(json!({"b": "x", "a": 1, "c": null}))
        .into("t")
        .to_sql();
    assert_eq!(sql, "INSERT INTO t (b, a, c) VALUES ('x', 1, NULL)");
}

#[test]
fn test_insert_json_large_integer_is_exact() {
    let sql = QueryBuilder::new()
        .insert_json(json!({"id": 18446744073709551615_u64}))
        .into("t")
        .to_sql();
    assert_eq!(sql, "INSERT INTO t (id) VALUES (18446744073709551615)");
}

#[test]
fn test_where_accepts_unsigned_ids() {
    let id: u64 = 42;
    let len: usize = 3;
    let sql = select(["id"])
        .from("t")
        .where_("id", "=", id)
        .or_where("n", "<", len)
        .to_sql();
    assert_eq!(sql, "SELECT id FROM t WHERE id = 42 OR WHERE n < 3");
}

#[test]
fn test_update_json_nested_object_is_inlined() {
    let sql = QueryBuilder::new()
        .update_json(json!({"name": "Zayne", "meta": {"k": "it's"}}))
        .where_("name", "=", "Sean")
        .from("users")
        .to_sql();
    assert_eq!(
        sql,
        r#"UPDATE users SET name = 'Zayne', meta = '{"k":"it''s"}' WHERE name = 'Sean'"#
    );
}

#[test]
fn test_delete_example() {
    let sql = delete().from("t").where_("id", "=", 5).to_sql();
    assert_eq!(sql, "DELETE FROM t WHERE id = 5");
}

#[test]
fn test_unset_kind_renders_empty() {
    let qb = QueryBuilder::new().from("users").where_("id", "=", 1).limit(3);
    assert_eq!(qb.to_sql(), "");
    assert_eq!(qb.build().kind, StatementKind::None);
}

#[test]
fn test_multiple_where_calls() {
    let sql = select(["*"])
        .from("t")
        .where_("c1", "=", 1)
        .where_("c2", ">", 2)
        .or_where("c3", "<", 3)
        .to_sql();
    assert_eq!(
        sql,
        "SELECT * FROM t WHERE c1 = 1 WHERE c2 > 2 OR WHERE c3 < 3"
    );
}

#[test]
fn test_where_then_or_where() {
    let sql = select(["id"])
        .from("t")
        .where_("c1", "=", "v1")
        .or_where("c2", "=", "v2")
        .to_sql();
    assert_eq!(sql, "SELECT id FROM t WHERE c1 = 'v1' OR WHERE c2 = 'v2'");
}

#[test]
fn test_and_group_follows_where_group() {
    // call order is irrelevant: the AND group always comes after the WHERE group
    let sql = select(["id"])
        .from("users")
        .and("age", ">=", 18)
        .where_("status", "=", "active")
        .and("country", "=", "NZ")
        .to_sql();
    assert_eq!(
        sql,
        "SELECT id FROM users WHERE status = 'active' AND age >= 18 AND country = 'NZ'"
    );
}

#[test]
fn test_joins_in_insertion_order() {
    let sql = select(["u.name", "r.title", "p.url"])
        .from("users u")
        .inner_join("roles r", "u.role_id", "r.id")
        .left_join("profiles p", "p.user_id =", "u.id")
        .right_join("teams tm", "tm.id =", "u.team_id")
        .join("orgs o", "o.id =", "tm.org_id")
        .to_sql();
    assert_eq!(
        sql,
        "SELECT u.name, r.title, p.url FROM users u \
         INNER JOIN roles r ON u.role_id = r.id \
         LEFT JOIN profiles p ON p.user_id = u.id \
         RIGHT JOIN teams tm ON tm.id = u.team_id \
         JOIN orgs o ON o.id = tm.org_id"
    );
}

#[test]
fn test_order_limit_offset() {
    let sql = select(["name"])
        .from("character")
        .where_("num_shows", ">", 10)
        .order_by("num_shows", Direction::Desc)
        .limit(15)
        .offset(5)
        .to_sql();
    assert_eq!(
        sql,
        "SELECT name FROM character WHERE num_shows > 10 ORDER BY num_shows DESC LIMIT 15 OFFSET 5"
    );
}

#[test]
fn test_order_by_defaults_to_asc() {
    let sql = select(["a"])
        .from("t")
        .order_by("a", Direction::default())
        .order_by_desc("b")
        .order_by_asc("c")
        .to_sql();
    assert_eq!(sql, "SELECT a FROM t ORDER BY a ASC b DESC c ASC");
}

#[test]
fn test_direction_parse() {
    assert_eq!("desc".parse::<Direction>().unwrap(), Direction::Desc);
    assert_eq!("ASC".parse::<Direction>().unwrap(), Direction::Asc);
    assert!("sideways".parse::<Direction>().is_err());
}

#[test]
fn test_values_are_escaped_identifiers_are_not() {
    let sql = select(["id"])
        .from("users")
        .where_("name", "=", "x' OR '1'='1")
        .to_sql();
    assert_eq!(sql, "SELECT id FROM users WHERE name = 'x'' OR ''1''=''1'");

    let sql = update([("bio", r"C:\temp's")]).from("users").to_sql();
    assert_eq!(sql, r"UPDATE users SET bio = E'C:\\temp''s'");

    let sql = insert([("note", "'); DROP TABLE t; --")]).into("t").to_sql();
    assert_eq!(sql, "INSERT INTO t (note) VALUES ('''); DROP TABLE t; --')");
}

#[test]
fn test_in_list_value() {
    let sql = select(["id"])
        .from("users")
        .where_("id", "IN", vec![1, 2])
        .to_sql();
    assert_eq!(sql, "SELECT id FROM users WHERE id IN (1, 2)");

    let sql = select(["id"])
        .from("users")
        .where_("name", "NOT IN", vec!["a", "b'c"])
        .to_sql();
    assert_eq!(sql, "SELECT id FROM users WHERE name NOT IN ('a', 'b''c')");

    let sql = select(["id"])
        .from("users")
        .where_("id", "IN", Vec::<i64>::new())
        .to_sql();
    assert_eq!(sql, "SELECT id FROM users WHERE id IN (NULL)");
}

#[test]
fn test_rendering_is_idempotent() {
    let qb = select(["a"])
        .from("t")
        .where_("x", "=", "y")
        .and("z", "<", 3.5)
        .order_by_desc("a")
        .limit(1);
    let first = qb.to_sql();
    let second = qb.to_sql();
    assert_eq!(first, second);

    let query = qb.build();
    assert_eq!(query.to_sql(), query.to_sql());
    assert_eq!(query.to_sql(), first);
}

#[test]
fn test_last_kind_wins() {
    let sql = select(["a"])
        .from("t")
        .update([("a", 1)])
        .where_("id", "=", 2)
        .to_sql();
    assert_eq!(sql, "UPDATE t SET a = 1 WHERE id = 2");

    let sql = update([("a", 1)]).from("t").delete().to_sql();
    assert_eq!(sql, "DELETE FROM t");
}

#[test]
fn test_take_sql_resets_descriptor() {
    let mut query = delete().from("t").where_("id", "=", 1).build();
    assert_eq!(query.take_sql(), "DELETE FROM t WHERE id = 1");
    assert!(query.is_empty());
    assert_eq!(query.take_sql(), "");
}

#[test]
fn test_take_and_reset() {
    let mut qb = select(["a"]).from("t");
    let q = qb.take();
    assert_eq!(q.to_sql(), "SELECT a FROM t");
    assert!(qb.as_query().is_empty());

    let mut qb = select(["a"]).from("t");
    qb.reset();
    assert_eq!(qb.to_sql(), "");
}

#[test]
fn test_chains_do_not_share_state() {
    let base = select(["id"]).from("users");
    let active = base.clone().where_("status", "=", "active");
    let banned = base.clone().where_("status", "=", "banned");

    assert_eq!(base.to_sql(), "SELECT id FROM users");
    assert_eq!(active.to_sql(), "SELECT id FROM users WHERE status = 'active'");
    assert_eq!(banned.to_sql(), "SELECT id FROM users WHERE status = 'banned'");
}

#[test]
fn test_optional_and_null_values() {
    let sql = update(crate::values! { "deleted_at" => Option::<i64>::None, "flag" => true })
        .from("t")
        .where_("id", "=", Some(4_i64))
        .to_sql();
    assert_eq!(sql, "UPDATE t SET deleted_at = NULL, flag = true WHERE id = 4");
}

#[test]
fn test_query_display_matches_render() {
    let q = delete().from("t").build();
    assert_eq!(format!("{q}"), "DELETE FROM t");
}
