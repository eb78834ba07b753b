use chrono::NaiveDate;
use nexlog_core::{
    Autocomplete, FixedClock, InMemoryLogRepository, JumpTarget, Person, PersonDirectory, Role,
    TimelineConfig, TimelineError, TimelineService, ValidationError,
};

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn people() -> Vec<Person> {
    vec![
        Person::new(1, "John Doe", Role::Teacher),
        Person::new(2, "Jane Smith", Role::Teacher),
        Person::new(3, "Bob Johnson", Role::Teacher),
    ]
}

fn timeline() -> TimelineService<InMemoryLogRepository, FixedClock> {
    TimelineService::new(
        InMemoryLogRepository::new(),
        PersonDirectory::new(people()),
        FixedClock(day(3, 10)),
        TimelineConfig::default(),
    )
}

#[test]
fn search_matches_case_insensitive_substrings() {
    let timeline = timeline();
    let names: Vec<String> = timeline
        .search_people("jo")
        .into_iter()
        .map(|person| person.name)
        .collect();
    assert_eq!(names, vec!["John Doe", "Bob Johnson"]);
}

#[test]
fn empty_search_suggests_nothing() {
    let timeline = timeline();
    assert!(timeline.search_people("").is_empty());
}

#[test]
fn trailing_space_is_part_of_the_query() {
    let timeline = timeline();
    assert!(timeline.search_people("smith ").is_empty());
    assert!(timeline.search_people(" \t").is_empty());

    let names: Vec<String> = timeline
        .search_people("jane ")
        .into_iter()
        .map(|person| person.name)
        .collect();
    assert_eq!(names, vec!["Jane Smith"]);
}

#[test]
fn autocomplete_selection_filters_timeline_by_author() {
    let mut timeline = timeline();
    timeline.submit_log(2, day(3, 1), "by jane", None).unwrap();
    timeline.submit_log(1, day(3, 2), "by john", None).unwrap();

    let mut autocomplete = Autocomplete::new();
    let suggestions = autocomplete
        .update("SMI", timeline.directory().people())
        .to_vec();
    assert_eq!(suggestions.len(), 1);
    autocomplete.select(&suggestions[0]);
    assert!(autocomplete.suggestions().is_empty());

    let selected = autocomplete.selected().unwrap();
    let contents: Vec<&str> = timeline
        .logs_by_author(selected.id)
        .iter()
        .map(|log| log.content.as_str())
        .collect();
    assert_eq!(contents, vec!["by jane"]);
}

#[test]
fn jump_resolves_exact_nearest_and_none() {
    let mut timeline = timeline();
    timeline.submit_log(1, day(3, 1), "first", None).unwrap();
    timeline.submit_log(1, day(3, 3), "third", None).unwrap();

    assert_eq!(timeline.jump_to_date(day(3, 3)), Some(JumpTarget::Exact(day(3, 3))));
    assert_eq!(timeline.jump_to_date(day(3, 2)), Some(JumpTarget::Nearest(day(3, 1))));
    assert_eq!(timeline.jump_to_date(day(2, 1)), None);
    assert_eq!(timeline.jump_to_date(day(12, 31)), Some(JumpTarget::Nearest(day(3, 3))));
}

#[test]
fn jump_brings_target_group_into_view() {
    let mut timeline = timeline();
    for d in 1..=6 {
        timeline.submit_log(1, day(3, d), "entry", None).unwrap();
    }
    assert!(timeline.visible_keys().is_empty());

    timeline.jump_to_date(day(3, 2)).unwrap();
    assert_eq!(timeline.visible_keys().len(), 5);
    assert_eq!(timeline.visible_keys().last(), Some(&day(3, 2)));
}

#[test]
fn page_requests_clamp_to_last_page() {
    let mut timeline = timeline();
    for n in 0..12 {
        timeline
            .submit_log(1, day(3, 1), &format!("entry {n}"), None)
            .unwrap();
    }

    let far = timeline.get_page(day(3, 1), 10, 5).unwrap();
    let last = timeline.get_page(day(3, 1), 3, 5).unwrap();
    assert_eq!(far, last);
    assert_eq!(far.page_number, 3);
    assert_eq!(far.total_pages, 3);
    assert_eq!(far.items.len(), 2);
    assert_eq!(far.items[1].content, "entry 11");
}

#[test]
fn default_page_uses_configured_size() {
    let mut timeline = timeline();
    for n in 0..7 {
        timeline
            .submit_log(1, day(3, 1), &format!("entry {n}"), None)
            .unwrap();
    }

    let page = timeline.get_default_page(day(3, 1), 1).unwrap();
    assert_eq!(page.items.len(), 5);
    assert!(page.has_next);
}

#[test]
fn zero_page_size_is_a_validation_error() {
    let timeline = timeline();
    assert_eq!(
        timeline.get_page(day(3, 1), 1, 0).unwrap_err(),
        TimelineError::Validation(ValidationError::InvalidPageSize)
    );
}

#[test]
fn unknown_day_yields_empty_page() {
    let timeline = timeline();
    let page = timeline.get_page(day(5, 5), 2, 5).unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.page_number, 1);
}
