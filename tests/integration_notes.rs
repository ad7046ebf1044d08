use chrono::NaiveDate;
use tempfile::NamedTempFile;

use xcalendar_core::notes::NotesIndex;
use xcalendar_core::storage::Storage;

fn temp_db_url() -> String {
    let temp_file = NamedTempFile::new().unwrap();
    let (_, path) = temp_file.keep().unwrap();
    format!("sqlite:{}", path.to_str().unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_buy_milk_scenario() {
    let storage = Storage::open(&temp_db_url()).await.unwrap();
    let mut index = NotesIndex::load(storage).await.unwrap();

    index
        .add_note(date(2024, 3, 15), "geral", "buy milk")
        .await
        .unwrap();

    let day = index.notes_for_date(date(2024, 3, 15));
    assert_eq!(day.len(), 1);
    assert_eq!(day["geral"].len(), 1);
    assert_eq!(day["geral"][0].text, "buy milk");
    assert_eq!(day["geral"][0].category, "geral");
}

#[tokio::test]
async fn test_index_round_trips_through_reload() {
    let db_url = temp_db_url();

    {
        let storage = Storage::open(&db_url).await.unwrap();
        let mut index = NotesIndex::load(storage).await.unwrap();
        index.add_note(date(2024, 3, 15), "geral", "first").await.unwrap();
        index.add_note(date(2024, 3, 15), "geral", "second").await.unwrap();
        index.add_note(date(2024, 3, 15), "saude", "checkup").await.unwrap();
        index.add_note(date(2024, 4, 1), "geral", "april").await.unwrap();
    }

    let storage = Storage::open(&db_url).await.unwrap();
    let index = NotesIndex::load(storage).await.unwrap();

    let keys: Vec<&String> = index.data().keys().collect();
    assert_eq!(keys, vec!["2024-03-15", "2024-04-01"]);

    let march = index.notes_for_date(date(2024, 3, 15));
    let categories: Vec<&String> = march.keys().collect();
    assert_eq!(categories, vec!["geral", "saude"]);

    let texts: Vec<&str> = march["geral"].iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn test_deletions_persist_including_empty_lists() {
    let db_url = temp_db_url();

    {
        let storage = Storage::open(&db_url).await.unwrap();
        let mut index = NotesIndex::load(storage).await.unwrap();
        index.add_note(date(2024, 3, 15), "geral", "only").await.unwrap();
        index.delete_note(date(2024, 3, 15), "geral", 0).await.unwrap();
    }

    let storage = Storage::open(&db_url).await.unwrap();
    let index = NotesIndex::load(storage).await.unwrap();

    // the emptied category list is still present after reload
    let day = index.notes_for_date(date(2024, 3, 15));
    assert!(day.contains_key("geral"));
    assert!(day["geral"].is_empty());
    assert!(index.summarize(date(2024, 3, 15)).is_empty());
}

#[tokio::test]
async fn test_summary_counts_across_categories() {
    let storage = Storage::open(&temp_db_url()).await.unwrap();
    let mut index = NotesIndex::load(storage).await.unwrap();

    for i in 0..3 {
        index
            .add_note(date(2024, 3, 15), "geral", &format!("g{i}"))
            .await
            .unwrap();
    }
    for i in 0..5 {
        index
            .add_note(date(2024, 3, 15), "saude", &format!("s{i}"))
            .await
            .unwrap();
    }

    let summary = index.summarize(date(2024, 3, 15));
    let pairs: Vec<(&str, usize)> = summary
        .iter()
        .map(|s| (s.category.as_str(), s.count))
        .collect();
    assert_eq!(pairs, vec![("saude", 5), ("geral", 3)]);
}
