use bson::oid::ObjectId;
use chrono::{DateTime, NaiveDate, Utc};

use crate::models::News;
use crate::service::storage::collections::news as news_store;
use crate::service::storage::MongoStore;

pub fn help_text() -> &'static str {
    "Commands:\n\
     • add <date> <title…>   store a headline; date is YYYY-MM-DD or RFC 3339\n\
     • show <id>             one headline by ObjectId"
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsCommand {
    Add(News),
    Show(ObjectId),
    Help,
}

pub fn parse(text: &str) -> Result<NewsCommand, String> {
    let mut parts = text.split_whitespace();
    let Some(cmd) = parts.next().map(str::to_ascii_lowercase) else {
        return Ok(NewsCommand::Help);
    };

    match cmd.as_str() {
        "add" => {
            let date = parts
                .next()
                .ok_or("date required, e.g., add 2024-03-05 Bitcoin hits new high")?;
            let date = parse_date(date)?;
            let title = parts.collect::<Vec<_>>().join(" ");
            if title.is_empty() {
                return Err("title required after the date".to_string());
            }
            Ok(NewsCommand::Add(News::new(title, date)))
        }
        "show" => {
            let raw = parts.next().ok_or("id required, e.g., show 65e6...")?;
            ObjectId::parse_str(raw)
                .map(NewsCommand::Show)
                .map_err(|e| format!("invalid id {raw}: {e}"))
        }
        _ => Ok(NewsCommand::Help),
    }
}

pub async fn handle(text: &str, store: &MongoStore) -> Result<String, String> {
    match parse(text)? {
        NewsCommand::Add(mut news) => {
            news_store::insert(store, &mut news)
                .await
                .map_err(|e| format!("insert error: {e}"))?;
            render_json(&news)
        }
        NewsCommand::Show(id) => match news_store::find_by_id(store, id)
            .await
            .map_err(|e| format!("fetch error: {e}"))?
        {
            Some(news) => render_json(&news),
            None => Ok(format!("No news with id {id}.")),
        },
        NewsCommand::Help => Ok(help_text().to_string()),
    }
}

/// Accepts RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid date {raw}: expected YYYY-MM-DD or RFC 3339"))
}

fn render_json(news: &News) -> Result<String, String> {
    let value = news
        .to_relaxed_json()
        .map_err(|e| format!("encode error: {e}"))?;
    serde_json::to_string_pretty(&value).map_err(|e| format!("encode error: {e}"))
}
