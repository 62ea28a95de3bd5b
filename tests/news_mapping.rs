use bson::{doc, oid::ObjectId};
use chrono::{DateTime, TimeZone, Utc};

use crypto_news::models::{fields, News};

fn march_fifth() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
}

fn persisted(id: ObjectId) -> News {
    News::from_document(doc! {
        "_id": id,
        "title": "Bitcoin hits new high",
        "date": bson::DateTime::from_chrono(march_fifth()),
    })
    .expect("valid document")
}

fn keys(doc: &bson::Document) -> Vec<&str> {
    doc.keys().map(String::as_str).collect()
}

#[test]
fn unsaved_news_omits_the_identifier() {
    let news = News::new("Bitcoin hits new high", march_fifth());
    let doc = news.to_document().unwrap();

    assert_eq!(keys(&doc), vec![fields::TITLE, fields::DATE]);
    assert_eq!(doc.get_str("title").unwrap(), "Bitcoin hits new high");
    assert_eq!(
        *doc.get_datetime("date").unwrap(),
        bson::DateTime::from_chrono(march_fifth())
    );
}

#[test]
fn persisted_news_maps_to_exactly_the_document_keys() {
    let id = ObjectId::new();
    let doc = persisted(id).to_document().unwrap();

    assert_eq!(keys(&doc), vec!["_id", "title", "date"]);
    assert_eq!(doc.get_object_id(fields::ID).unwrap(), id);
    for in_memory in ["Id", "Title", "Date"] {
        assert!(!doc.contains_key(in_memory), "{in_memory} leaked into document");
    }
}

#[test]
fn document_round_trip_preserves_every_field() {
    let news = News::new("ETH upgrade ships", Utc::now());
    let back = News::from_document(news.to_document().unwrap()).unwrap();
    assert_eq!(back, news);
    assert_eq!(back.id(), None);

    let stored = persisted(ObjectId::new());
    let back = News::from_document(stored.to_document().unwrap()).unwrap();
    assert_eq!(back, stored);
    assert_eq!(back.id(), stored.id());
}

#[test]
fn relaxed_json_matches_the_stored_shape() {
    let id = ObjectId::new();
    let json = persisted(id).to_relaxed_json().unwrap();

    assert_eq!(json["_id"]["$oid"], id.to_hex());
    assert_eq!(json["title"], "Bitcoin hits new high");
    let date = json["date"]["$date"].as_str().expect("relaxed date string");
    assert_eq!(
        DateTime::parse_from_rfc3339(date).unwrap().with_timezone(&Utc),
        march_fifth()
    );
}

#[test]
fn extra_document_keys_are_ignored() {
    let news = News::from_document(doc! {
        "_id": ObjectId::new(),
        "title": "Solana outage",
        "date": bson::DateTime::from_chrono(march_fifth()),
        "source": "wire",
    })
    .unwrap();
    assert_eq!(news.title, "Solana outage");
}

#[test]
fn missing_title_fails_to_decode() {
    let result = News::from_document(doc! {
        "_id": ObjectId::new(),
        "date": bson::DateTime::from_chrono(march_fifth()),
    });
    assert!(result.is_err());
}

#[test]
fn malformed_identifier_fails_to_decode() {
    let result = News::from_document(doc! {
        "_id": "not-an-object-id",
        "title": "x",
        "date": bson::DateTime::from_chrono(march_fifth()),
    });
    assert!(result.is_err());
}

#[test]
fn string_date_fails_to_decode() {
    let result = News::from_document(doc! {
        "title": "x",
        "date": "2024-03-05T00:00:00Z",
    });
    assert!(result.is_err());
}

#[test]
fn reassigned_nanosecond_date_round_trips() {
    let mut news = News::new("Bitcoin hits new high", march_fifth());
    news.set_date(Utc.timestamp_opt(1_709_596_800, 123_456_789).unwrap());

    let back = News::from_document(news.to_document().unwrap()).unwrap();
    assert_eq!(back, news);
    assert_eq!(back.date().timestamp_subsec_nanos(), 123_000_000);
}
