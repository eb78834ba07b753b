use chrono::NaiveDate;
use nexlog_core::{
    CommentAuthor, FixedClock, InMemoryLogRepository, Person, PersonDirectory, Role,
    TimelineConfig, TimelineError, TimelineService, ValidationError,
};

fn timeline() -> TimelineService<InMemoryLogRepository, FixedClock> {
    TimelineService::new(
        InMemoryLogRepository::new(),
        PersonDirectory::new(vec![
            Person::new(1, "John Doe", Role::Teacher),
            Person::new(9, "Dana Reyes", Role::Admin),
        ]),
        FixedClock(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()),
        TimelineConfig::default(),
    )
}

fn first_of_march() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

#[test]
fn admin_comment_is_unread_for_teacher_only() {
    let mut timeline = timeline();
    let log = timeline.submit_log(1, first_of_march(), "lesson", None).unwrap();
    let comment = timeline
        .post_comment(log.id, CommentAuthor::from_role(Role::Admin), "Please add a link")
        .unwrap();

    assert!(!comment.is_read);
    assert_eq!(timeline.unread_count_for(log.id, Role::Teacher).unwrap(), 1);
    assert_eq!(timeline.unread_count_for(log.id, Role::Admin).unwrap(), 0);
    assert_eq!(timeline.total_unread(Role::Teacher), 1);
}

#[test]
fn teacher_reply_on_own_log_is_pre_read() {
    let mut timeline = timeline();
    let log = timeline.submit_log(1, first_of_march(), "lesson", None).unwrap();
    let reply = timeline
        .post_comment(log.id, CommentAuthor::from_role(Role::Teacher), "Added")
        .unwrap();

    assert!(reply.is_read);
    assert_eq!(timeline.unread_count_for(log.id, Role::Teacher).unwrap(), 0);
}

#[test]
fn mark_read_is_idempotent() {
    let mut timeline = timeline();
    let log = timeline.submit_log(1, first_of_march(), "lesson", None).unwrap();
    let comment = timeline
        .post_comment(log.id, CommentAuthor::from_role(Role::Admin), "Nice")
        .unwrap();

    timeline.mark_comment_read(log.id, comment.id).unwrap();
    let once = timeline.get_log(log.id).unwrap().clone();
    timeline.mark_comment_read(log.id, comment.id).unwrap();
    let twice = timeline.get_log(log.id).unwrap().clone();

    assert_eq!(once, twice);
    assert_eq!(timeline.total_unread(Role::Teacher), 0);
}

#[test]
fn comment_ids_follow_insertion_order() {
    let mut timeline = timeline();
    let log = timeline.submit_log(1, first_of_march(), "lesson", None).unwrap();
    for text in ["a", "b", "c"] {
        timeline
            .post_comment(log.id, CommentAuthor::from_role(Role::Admin), text)
            .unwrap();
    }

    let thread = &timeline.get_log(log.id).unwrap().comments;
    let ids: Vec<u64> = thread.iter().map(|c| c.id).collect();
    let texts: Vec<&str> = thread.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(texts, vec!["a", "b", "c"]);
    assert_eq!(timeline.metrics().total_comments, 3);
}

#[test]
fn invalid_comments_fail_without_side_effects() {
    let mut timeline = timeline();
    let log = timeline.submit_log(1, first_of_march(), "lesson", None).unwrap();

    let missing = timeline
        .post_comment(77, CommentAuthor::from_role(Role::Admin), "hello")
        .unwrap_err();
    assert_eq!(missing, TimelineError::LogNotFound(77));

    let blank = timeline
        .post_comment(log.id, CommentAuthor::from_role(Role::Admin), " \t ")
        .unwrap_err();
    assert_eq!(blank, TimelineError::Validation(ValidationError::EmptyComment));

    assert!(timeline.get_log(log.id).unwrap().comments.is_empty());
    assert_eq!(timeline.metrics().total_comments, 0);
}

#[test]
fn mark_read_on_missing_targets_is_not_found() {
    let mut timeline = timeline();
    let log = timeline.submit_log(1, first_of_march(), "lesson", None).unwrap();

    assert_eq!(
        timeline.mark_comment_read(5, 1).unwrap_err(),
        TimelineError::LogNotFound(5)
    );
    assert_eq!(
        timeline.mark_comment_read(log.id, 3).unwrap_err(),
        TimelineError::CommentNotFound {
            log_id: log.id,
            comment_id: 3
        }
    );
}

#[test]
fn opening_a_thread_clears_its_badge() {
    let mut timeline = timeline();
    let log = timeline.submit_log(1, first_of_march(), "lesson", None).unwrap();
    let other = timeline.submit_log(1, first_of_march(), "lab", None).unwrap();
    let admin = Person::new(9, "Dana Reyes", Role::Admin);
    for target in [log.id, log.id, other.id] {
        timeline
            .post_comment(target, CommentAuthor::from(&admin), "question")
            .unwrap();
    }

    assert_eq!(timeline.mark_thread_read(log.id, Role::Teacher).unwrap(), 2);
    assert_eq!(timeline.total_unread(Role::Teacher), 1);
    let comment = &timeline.get_log(other.id).unwrap().comments[0];
    assert!(comment.is_new_for(Role::Teacher));
    assert_eq!(comment.author.name, "Dana Reyes");
}
