//! Demo content
//!
//! Seeds the database with a small set of sample posts so a fresh install has
//! something to show. Re-running replaces the previous demo rows, so local
//! databases can be refreshed to a known state.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, SqlitePool};

struct DemoPost {
    url_id: &'static str,
    title: &'static str,
    image_url: &'static str,
    category: &'static str,
    tags: &'static str,
    date: &'static str,
    views: i64,
    likes: i64,
    active: bool,
}

const DEMO_CONTENT: &str = "# Title 1\n\n\
Illo **sint voluptas**. Error voluptates culpa eligendi. \
Hic vel totam vitae illo. Non aliquid explicabo necessitatibus unde. \
Sed exercitationem placeat consectetur nulla deserunt vel \
iusto corrupti dicta laboris incididunt.\n\n\
## Subtitle 1\n\n\
Illo sint *voluptas*. Error voluptates culpa eligendi. \
Hic vel totam vitae illo. Non aliquid explicabo necessitatibus unde. \
Sed exercitationem placeat consectetur nulla deserunt vel \
iusto corrupti dicta laboris incididunt.";

const DEMO_DESCRIPTION: &str = "Illo sint voluptas. Error voluptates culpa eligendi. \
Hic vel totam vitae illo. Non aliquid explicabo necessitatibus unde. \
Sed exercitationem placeat consectetur nulla deserunt vel \
iusto corrupti dicta laboris incididunt.";

const DEMO_POSTS: &[DemoPost] = &[
    DemoPost {
        url_id: "boost-your-conversion-rate",
        title: "Boost your conversion rate",
        image_url: "https://images.unsplash.com/photo-1496128858413-b36217c2ce36?ixlib=rb-4.0.3&auto=format&fit=crop&w=3603&q=80",
        category: "Node",
        tags: "Back-End,Databases",
        date: "2022-04-18T00:00:00Z",
        views: 320,
        likes: 3,
        active: true,
    },
    DemoPost {
        url_id: "better-front-ends-with-fatboy-slim",
        title: "Better front ends with Fatboy Slim",
        image_url: "https://plus.unsplash.com/premium_photo-1661342428515-5ca8cee4385a?q=80&w=870&auto=format&fit=crop&ixlib=rb-4.0.3",
        category: "React",
        tags: "Front-End,Optimisation",
        date: "2020-03-16T00:00:00Z",
        views: 10,
        likes: 1,
        active: true,
    },
    DemoPost {
        url_id: "no-front-end-framework-is-the-best",
        title: "No front end framework is the best",
        image_url: "https://plus.unsplash.com/premium_photo-1661517706036-a48d5fc8f2f5?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3",
        category: "React",
        tags: "Front-End,Dev Tools",
        date: "2024-12-16T00:00:00Z",
        views: 22,
        likes: 2,
        active: true,
    },
    DemoPost {
        url_id: "visual-basic-is-the-future",
        title: "Visual Basic is the future",
        image_url: "https://m.media-amazon.com/images/I/51NqEfmmBTL.jpg",
        category: "React",
        tags: "Programming,Mainframes",
        date: "2012-12-16T00:00:00Z",
        views: 22,
        likes: 1,
        active: false,
    },
];

/// Replace all posts and likes with the demo set
pub async fn seed_demo_content(pool: &DynDatabasePool) -> Result<()> {
    tracing::info!("Seeding demo content ({} posts)", DEMO_POSTS.len());

    match pool.driver() {
        DatabaseDriver::Sqlite => seed_sqlite(pool.as_sqlite().unwrap()).await,
        DatabaseDriver::Mysql => seed_mysql(pool.as_mysql().unwrap()).await,
    }
}

fn demo_date(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid demo post date: {}", raw))?;
    Ok(parsed.with_timezone(&Utc))
}

async fn seed_sqlite(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM likes")
        .execute(pool)
        .await
        .context("Failed to clear likes")?;
    sqlx::query("DELETE FROM posts")
        .execute(pool)
        .await
        .context("Failed to clear posts")?;
    // Restart IDs at 1 so the demo set is stable across reseeds
    sqlx::query("DELETE FROM sqlite_sequence WHERE name = 'posts'")
        .execute(pool)
        .await
        .context("Failed to reset post sequence")?;

    for (index, post) in DEMO_POSTS.iter().enumerate() {
        let content = format!("{} ... post{}", DEMO_CONTENT, index + 1);
        let date = demo_date(post.date)?;

        let result = sqlx::query(
            r#"
            INSERT INTO posts (url_id, title, description, content, image_url, category, tags, date, views, likes, active)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(post.url_id)
        .bind(post.title)
        .bind(DEMO_DESCRIPTION)
        .bind(&content)
        .bind(post.image_url)
        .bind(post.category)
        .bind(post.tags)
        .bind(date)
        .bind(post.views)
        .bind(post.likes)
        .bind(post.active)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to seed post {}", post.url_id))?;

        let post_id = result.last_insert_rowid();

        for i in 0..post.likes {
            sqlx::query("INSERT INTO likes (post_id, user_ip, created_at) VALUES (?, ?, ?)")
                .bind(post_id)
                .bind(format!("192.168.100.{}", i))
                .bind(Utc::now())
                .execute(pool)
                .await
                .with_context(|| format!("Failed to seed likes for {}", post.url_id))?;
        }
    }

    Ok(())
}

async fn seed_mysql(pool: &MySqlPool) -> Result<()> {
    sqlx::query("DELETE FROM likes")
        .execute(pool)
        .await
        .context("Failed to clear likes")?;
    sqlx::query("DELETE FROM posts")
        .execute(pool)
        .await
        .context("Failed to clear posts")?;
    sqlx::query("ALTER TABLE posts AUTO_INCREMENT = 1")
        .execute(pool)
        .await
        .context("Failed to reset post sequence")?;

    for (index, post) in DEMO_POSTS.iter().enumerate() {
        let content = format!("{} ... post{}", DEMO_CONTENT, index + 1);
        let date = demo_date(post.date)?;

        let result = sqlx::query(
            r#"
            INSERT INTO posts (url_id, title, description, content, image_url, category, tags, date, views, likes, active)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(post.url_id)
        .bind(post.title)
        .bind(DEMO_DESCRIPTION)
        .bind(&content)
        .bind(post.image_url)
        .bind(post.category)
        .bind(post.tags)
        .bind(date)
        .bind(post.views)
        .bind(post.likes)
        .bind(post.active)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to seed post {}", post.url_id))?;

        let post_id = result.last_insert_id() as i64;

        for i in 0..post.likes {
            sqlx::query("INSERT INTO likes (post_id, user_ip, created_at) VALUES (?, ?, ?)")
                .bind(post_id)
                .bind(format!("192.168.100.{}", i))
                .bind(Utc::now())
                .execute(pool)
                .await
                .with_context(|| format!("Failed to seed likes for {}", post.url_id))?;
        }
    }

    Ok(())
}
