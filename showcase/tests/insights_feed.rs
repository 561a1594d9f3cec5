use serde_json::json;
use showcase::{FeedKind, FeedTab, RawRecord, build_feed, filter_tab};

fn records(value: serde_json::Value) -> Vec<RawRecord> {
    showcase::source::extract_records(value, showcase::Family::News)
}

fn titles<'a>(items: impl IntoIterator<Item = &'a showcase::NormalizedFeedItem>) -> Vec<&'a str> {
    items.into_iter().map(|item| item.title.as_str()).collect()
}

#[test]
fn case_study_published_later_comes_first() {
    let news = records(json!([{"title": "A", "date": "2024-01-01"}]));
    let cases = records(json!([{"title": "B", "publishedAt": "2024-06-01"}]));

    let feed = build_feed(&news, &cases);
    assert_eq!(titles(&feed), vec!["B", "A"]);
    assert_eq!(feed[0].kind, FeedKind::CaseStudy);
}

#[test]
fn undated_records_sort_after_dated_ones_whatever_the_input_order() {
    let news = records(json!([
        {"title": "undated news"},
        {"title": "dated news", "createdAt": "2021-03-04"}
    ]));
    let cases = records(json!([
        {"title": "bad date", "date": "next spring"},
        {"title": "dated case", "updatedAt": "2022-03-04"}
    ]));

    let feed = build_feed(&news, &cases);
    assert_eq!(titles(&feed), vec!["dated case", "dated news", "undated news", "bad date"]);
    assert_eq!(feed[3].date, "");
}

#[test]
fn unparseable_leading_date_is_not_rescued_by_later_fields() {
    let news = records(json!([{"title": "tbc", "date": "TBC", "publishedAt": "2024-06-01"}]));
    let cases = records(json!([{"title": "dated", "date": "2023-01-01"}]));

    let feed = build_feed(&news, &cases);
    assert_eq!(titles(&feed), vec!["dated", "tbc"]);
    assert_eq!(feed[1].date, "");
}

#[test]
fn feed_items_always_have_title_and_href() {
    let news = records(json!([{}, {"slug": "x"}, {"url": "https://example.com/x", "slug": "y"}]));
    let cases = records(json!([{"goals": ["only one goal"]}]));

    let feed = build_feed(&news, &cases);
    assert!(feed.iter().all(|item| !item.title.is_empty() && !item.href.is_empty()));

    let hrefs: Vec<&str> = feed.iter().map(|item| item.href.as_str()).collect();
    assert_eq!(hrefs, vec!["#", "/news/x", "https://example.com/x", "#"]);
    assert_eq!(feed[3].summary, "only one goal");
}

#[test]
fn tabs_partition_the_merged_feed() {
    let news = records(json!([
        {"title": "n1", "date": "2024-03-01"},
        {"title": "n2", "date": "2023-03-01"}
    ]));
    let cases = records(json!([{"title": "c1", "date": "2023-09-01"}]));

    let feed = build_feed(&news, &cases);
    let news_tab = filter_tab(&feed, FeedTab::News);
    let case_tab = filter_tab(&feed, FeedTab::CaseStudies);

    assert_eq!(titles(news_tab.iter().copied()), vec!["n1", "n2"]);
    assert_eq!(titles(case_tab.iter().copied()), vec!["c1"]);
    assert_eq!(news_tab.len() + case_tab.len(), filter_tab(&feed, FeedTab::All).len());
}

#[test]
fn rebuilding_is_deterministic() {
    let news = records(json!([
        {"title": "same day 1", "date": "2024-05-05"},
        {"title": "same day 2", "date": "2024-05-05"}
    ]));
    let cases = records(json!([{"title": "same day 3", "date": "2024-05-05T00:00:00Z"}]));

    let first = build_feed(&news, &cases);
    let second = build_feed(&news, &cases);
    assert_eq!(first, second);
    assert_eq!(titles(&first), vec!["same day 1", "same day 2", "same day 3"]);
}
