use std::cell::Cell;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use course_req_parser::models::{load_courses, CourseRecord, Requisite};
use course_req_parser::{run_batch, AppResult, CompletionClient, Config, FailureLog};
use serde_json::json;

/// 按需求文本中的关键字返回固定的模型输出
struct KeywordClient {
    calls: Cell<usize>,
}

impl KeywordClient {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl CompletionClient for KeywordClient {
    async fn complete(&self, _system: &str, user: &str) -> AppResult<Option<String>> {
        self.calls.set(self.calls.get() + 1);
        let reply = if user.contains("MATH 240") {
            Some("['&', 'COMP 250', ['|', 'MATH 240', 'MATH 235']]")
        } else if user.contains("COMP 250") {
            Some("['|', 'COMP 202', 'COMP 250']")
        } else if user.contains("ECSE") {
            Some("['and', 'ECSE 200']")
        } else {
            None
        };
        Ok(reply.map(str::to_string))
    }
}

fn write_courses(path: &Path) {
    let courses = json!([
        {
            "_id": "COMP251",
            "title": "Algorithms and Data Structures",
            "prerequisitesText": "Prerequisites: <a href='/courses/comp-250'>COMP 250</a> and <a href='/courses/math-240'>MATH 240</a> or <a href='/courses/math-235'>MATH 235</a>",
            "logicalPrerequisites": null,
            "logicalCorequisites": null
        },
        {
            "_id": "ECSE324",
            "prerequisitesText": "Prerequisites: <a href='/courses/ecse-200'>ECSE 200</a> and <a href='/courses/ecse-222'>ECSE 222</a>",
            "logicalPrerequisites": null,
            "logicalCorequisites": null
        },
        {
            "_id": "COMP206",
            "corequisitesText": "Corequisite: <a href='/courses/comp-202'>COMP 202</a> or <a href='/courses/comp-250'>COMP 250</a>",
            "logicalPrerequisites": null,
            "logicalCorequisites": null
        },
        {
            "_id": "COMP202",
            "logicalPrerequisites": null,
            "logicalCorequisites": null
        }
    ]);
    std::fs::write(path, serde_json::to_string_pretty(&courses).unwrap()).unwrap();
}

fn config_for(dir: &Path) -> Config {
    Config {
        courses_file: dir.join("courses.json").to_string_lossy().into_owned(),
        failure_log_file: dir.join("failed.txt").to_string_lossy().into_owned(),
        request_delay_secs: 0.0,
        ..Default::default()
    }
}

fn by_id<'a>(courses: &'a [CourseRecord], id: &str) -> &'a CourseRecord {
    courses.iter().find(|c| c.id == id).unwrap()
}

#[tokio::test]
async fn test_run_persists_trees_and_failures() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    write_courses(Path::new(&config.courses_file));

    let client = KeywordClient::new();
    let summary = run_batch(&config, &client, Arc::new(AtomicBool::new(false)))
        .await
        .unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.empty, 1);
    assert_eq!(summary.failed, vec!["ECSE324".to_string()]);

    let courses = load_courses(Path::new(&config.courses_file)).await.unwrap();
    assert_eq!(
        by_id(&courses, "COMP251")
            .logical(Requisite::Prerequisites)
            .unwrap()
            .to_string(),
        "(COMP 250 AND (MATH 240 OR MATH 235))"
    );
    assert_eq!(
        by_id(&courses, "COMP206")
            .logical(Requisite::Corequisites)
            .unwrap()
            .to_string(),
        "(COMP 202 OR COMP 250)"
    );
    assert!(!by_id(&courses, "ECSE324").is_parsed());
    assert_eq!(
        by_id(&courses, "COMP251").extra["title"],
        "Algorithms and Data Structures"
    );

    let failures = FailureLog::load(&config.failure_log_file).await.unwrap();
    assert_eq!(failures.ids().collect::<Vec<_>>(), ["ECSE324"]);
}

#[tokio::test]
async fn test_second_run_skips_parsed_and_failed() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    write_courses(Path::new(&config.courses_file));

    let first = KeywordClient::new();
    run_batch(&config, &first, Arc::new(AtomicBool::new(false)))
        .await
        .unwrap();

    let second = KeywordClient::new();
    let summary = run_batch(&config, &second, Arc::new(AtomicBool::new(false)))
        .await
        .unwrap();

    assert_eq!(second.calls.get(), 0);
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.empty, 1);
    assert!(summary.failed.is_empty());
    assert_eq!(summary.all_failed, vec!["ECSE324".to_string()]);

    // 失败记录保留
    let failures = FailureLog::load(&config.failure_log_file).await.unwrap();
    assert!(failures.contains("ECSE324"));
}

#[tokio::test]
async fn test_overwrite_reprocesses_parsed_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(dir.path());
    write_courses(Path::new(&config.courses_file));

    run_batch(&config, &KeywordClient::new(), Arc::new(AtomicBool::new(false)))
        .await
        .unwrap();

    config.overwrite = true;
    let client = KeywordClient::new();
    let summary = run_batch(&config, &client, Arc::new(AtomicBool::new(false)))
        .await
        .unwrap();

    assert_eq!(summary.processed, 2);
    // ECSE324 仍在失败记录中
    assert_eq!(summary.skipped, 1);
    assert_eq!(client.calls.get(), 2);
}

#[test]
fn test_interrupted_run_still_persists() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    write_courses(Path::new(&config.courses_file));

    let summary = tokio_test::block_on(run_batch(
        &config,
        KeywordClient::new(),
        Arc::new(AtomicBool::new(true)),
    ))
    .unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.visited(), 0);
    assert!(Path::new(&config.courses_file).exists());
    assert!(Path::new(&config.failure_log_file).exists());
}

#[tokio::test]
async fn test_missing_collection_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    let result = run_batch(&config, KeywordClient::new(), Arc::new(AtomicBool::new(false))).await;

    assert!(result.is_err());
    assert!(!Path::new(&config.failure_log_file).exists());
}

#[tokio::test]
async fn test_record_without_linked_courses_sends_no_request() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let courses = json!([
        {
            "_id": "COMP396",
            "prerequisites": [],
            "prerequisitesText": "Prerequisite: Permission of the instructor.",
            "corequisites": [],
            "logicalPrerequisites": null,
            "logicalCorequisites": null
        }
    ]);
    std::fs::write(&config.courses_file, courses.to_string()).unwrap();

    let client = KeywordClient::new();
    let summary = run_batch(&config, &client, Arc::new(AtomicBool::new(false)))
        .await
        .unwrap();

    assert_eq!(client.calls.get(), 0);
    assert_eq!(summary.empty, 1);
    assert_eq!(summary.processed, 0);

    // 链接列表原样写回
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config.courses_file).unwrap()).unwrap();
    assert_eq!(saved[0]["prerequisites"], json!([]));
}
