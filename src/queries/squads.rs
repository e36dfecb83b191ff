use anyhow::anyhow;
use sqlx::{query::QueryAs, Database, Encode, FromRow, MySql, MySqlConnection, Type};

use crate::{
    error::{AppError, AppResult},
    models::squads::Squad,
};

// `?` placeholders are shared by MySQL and SQLite.
const SQUAD_LIST_QUERY: &str = r#"
SELECT CAST(squads.id AS SIGNED) AS squad_id,
       squads.name AS name,
       COALESCE(squads.squad_profile, '') AS squad_profile,
       COUNT(sm.squad_id) AS members,
       COALESCE(category.name, '') AS category,
       CASE WHEN squads.is_private <> 0 THEN 1 ELSE 0 END AS is_private,
       CAST(squads.admin AS SIGNED) AS admin,
       CASE WHEN squads.admin = ? THEN 1 ELSE 0 END AS is_admin,
       99 AS new_messages
FROM squads
LEFT JOIN squad_members sm ON sm.squad_id = squads.id AND sm.is_active = 1
LEFT JOIN category ON category.id = squads.category
WHERE squads.id IN (
    SELECT squad_id FROM squad_members WHERE user_id = ? AND is_active = 1
)
GROUP BY squads.id, squads.name, squads.squad_profile, category.name,
         squads.is_private, squads.admin
"#;

/// Squad-list query with the requester bound, ready to run on any backend
/// that can map a [`Squad`] row.
pub fn squad_list_query<'q, DB>(
    user_id: i64,
) -> QueryAs<'q, DB, Squad, <DB as Database>::Arguments<'q>>
where
    DB: Database,
    Squad: for<'r> FromRow<'r, DB::Row>,
    i64: Encode<'q, DB> + Type<DB>,
{
    sqlx::query_as::<DB, Squad>(SQUAD_LIST_QUERY)
        .bind(user_id)
        .bind(user_id)
}

/// Squads the user is an active member of, one row per squad, in no
/// particular order.
pub async fn get_squads_by_member_id(
    conn: &mut MySqlConnection,
    user_id: i64,
) -> AppResult<Vec<Squad>> {
    let squads = squad_list_query::<MySql>(user_id)
        .fetch_all(conn)
        .await
        .map_err(|e| AppError::InternalServerError(anyhow!(e)))?;

    Ok(squads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{
        category, member, memory_pool, mysql_pool, seed_mysql, seed_sqlite, squad,
    };
    use crate::models::squads::FinalChat;
    use sqlx::{Sqlite, SqlitePool};

    async fn squads_for(pool: &SqlitePool, user_id: i64) -> Vec<Squad> {
        let mut squads = squad_list_query::<Sqlite>(user_id)
            .fetch_all(pool)
            .await
            .unwrap();
        squads.sort_by_key(|s| s.squad_id);
        squads
    }

    fn alpha() -> Squad {
        Squad {
            squad_id: 7,
            name: "Alpha".to_string(),
            squad_profile: "Alpha profile".to_string(),
            members: 2,
            category: "Gaming".to_string(),
            is_private: 0,
            admin: 42,
            is_admin: 1,
            new_messages: 99,
            final_chat: FinalChat::default(),
        }
    }

    fn alpha_rows() -> Vec<String> {
        vec![
            category(3, "Gaming"),
            squad(7, "Alpha", 42, 0, Some(3)),
            member(7, 42, true),
            member(7, 43, true),
            member(7, 44, false),
        ]
    }

    #[tokio::test]
    async fn user_without_memberships_gets_nothing() {
        let pool = memory_pool().await;
        seed_sqlite(&pool, &[squad(1, "Alpha", 2, 0, None), member(1, 2, true)]).await;

        assert!(squads_for(&pool, 42).await.is_empty());
    }

    #[tokio::test]
    async fn counts_active_members_and_joins_category() {
        let pool = memory_pool().await;
        seed_sqlite(&pool, &alpha_rows()).await;

        assert_eq!(squads_for(&pool, 42).await, vec![alpha()]);
    }

    #[tokio::test]
    async fn inactive_membership_hides_squad() {
        let pool = memory_pool().await;
        seed_sqlite(
            &pool,
            &[squad(1, "Alpha", 9, 0, None), member(1, 42, false), member(1, 9, true)],
        )
        .await;

        assert!(squads_for(&pool, 42).await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_membership_rows_do_not_duplicate_squad() {
        let pool = memory_pool().await;
        seed_sqlite(
            &pool,
            &[
                squad(1, "Alpha", 9, 0, None),
                member(1, 42, true),
                member(1, 42, true),
                member(1, 9, true),
            ],
        )
        .await;

        let squads = squads_for(&pool, 42).await;

        assert_eq!(squads.len(), 1);
        assert_eq!(squads[0].members, 3);
    }

    #[tokio::test]
    async fn flags_are_normalized_per_requester() {
        let pool = memory_pool().await;
        seed_sqlite(
            &pool,
            &[
                squad(1, "Mine", 42, 0, None),
                squad(2, "Theirs", 7, 5, None),
                member(1, 42, true),
                member(2, 42, true),
            ],
        )
        .await;

        let squads = squads_for(&pool, 42).await;

        assert_eq!(squads.len(), 2);
        assert_eq!((squads[0].is_admin, squads[0].is_private), (1, 0));
        assert_eq!((squads[1].is_admin, squads[1].is_private), (0, 1));
        assert_eq!(squads[1].admin, 7);
        assert!(squads.iter().all(|s| s.new_messages == 99));
    }

    #[tokio::test]
    async fn missing_category_renders_empty() {
        let pool = memory_pool().await;
        seed_sqlite(&pool, &[squad(1, "Alpha", 42, 0, Some(99)), member(1, 42, true)]).await;

        let squads = squads_for(&pool, 42).await;

        assert_eq!(squads[0].category, "");
    }

    #[tokio::test]
    async fn missing_table_fails_the_query() {
        let pool = memory_pool().await;
        sqlx::query("DROP TABLE category").execute(&pool).await.unwrap();

        assert!(squad_list_query::<Sqlite>(42).fetch_all(&pool).await.is_err());
    }

    #[tokio::test]
    #[ignore = "Requires MySQL database"]
    async fn mysql_text_and_unsigned_columns_decode() {
        let pool = mysql_pool().await;
        seed_mysql(&pool, &alpha_rows()).await;
        seed_mysql(&pool, &[squad(8, "Beta", 43, 1, None), member(8, 42, true)]).await;
        let mut conn = pool.acquire().await.unwrap();

        let mut squads = get_squads_by_member_id(&mut conn, 42).await.unwrap();
        squads.sort_by_key(|s| s.squad_id);

        assert_eq!(squads.len(), 2);
        assert_eq!(squads[0], alpha());
        assert_eq!(squads[1].squad_profile, "Beta profile");
        assert_eq!(squads[1].category, "");
        assert_eq!((squads[1].is_admin, squads[1].is_private), (0, 1));
        assert_eq!(squads[1].members, 1);
    }
}
