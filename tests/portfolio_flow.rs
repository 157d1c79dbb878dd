//! End-to-end flow over the public API: load a profile document, drive a
//! chat session against the quota store, and export the resume.

use std::io::Write;

use rstest::rstest;
use tempfile::TempDir;

use folio::chat::{ChatController, QuotaStore, MAX_USER_MESSAGES};
use folio::profile::{build_system_instruction, filter_projects, ProfileStore};

const PROFILE_JSON: &str = r#"{
  "firstName": "Grace",
  "lastName": "Hopper",
  "title": "Rear Admiral of Software",
  "summary": "Compiler pioneer.",
  "about": {
    "introduction": "I make programming accessible.",
    "paragraphs": ["Ships are safe in harbor, but that is not what ships are for."]
  },
  "experiences": [
    {
      "role": "Senior Scientist",
      "company": "Eckert-Mauchly",
      "period": "1949 - 1966",
      "location": "Philadelphia",
      "description": ["Built the A-0 system."],
      "skills": ["Compilers"]
    }
  ],
  "projects": [
    {
      "name": "A-0",
      "description": ["The first compiler."],
      "skills": ["Assembly", "Compilers"],
      "icon": "A",
      "linkText": "Read more"
    },
    {
      "name": "COBOL",
      "description": ["Business-oriented language."],
      "skills": ["Language Design", "Compilers"],
      "icon": "C",
      "linkText": "Read more"
    }
  ],
  "education": [
    { "institution": "Yale", "degree": "PhD Mathematics", "period": "1934" }
  ],
  "certifications": [],
  "skills": ["Compilers", "Mathematics"]
}"#;

fn load_profile(dir: &TempDir) -> ProfileStore {
    let path = dir.path().join("profile.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{PROFILE_JSON}").unwrap();
    ProfileStore::load(&path).unwrap()
}

#[test]
fn profile_loads_and_feeds_the_system_instruction() {
    let dir = tempfile::tempdir().unwrap();
    let store = load_profile(&dir);

    assert_eq!(store.data().full_name(), "Grace Hopper");

    let instruction = build_system_instruction(store.data());
    assert!(instruction.contains("Name: Grace Hopper"));
    assert!(instruction.contains("- Name: COBOL"));

    // No override in the document, so the defaults apply
    assert_eq!(store.example_questions().len(), 3);

    let tags = store.project_filter_tags();
    assert_eq!(tags[0], "all");
    assert!(tags.contains(&"compilers".to_string()));
}

#[rstest]
#[case("all", 2)]
#[case("compilers", 2)]
#[case("ASSEMBLY", 1)]
#[case("language", 1)]
#[case("cobol", 0)]
fn project_filtering_matches_skills(#[case] tag: &str, #[case] expected: usize) {
    let dir = tempfile::tempdir().unwrap();
    let store = load_profile(&dir);

    assert_eq!(filter_projects(&store.data().projects, tag).len(), expected);
}

#[test]
fn chat_session_exhausts_and_stays_banned_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let profile = load_profile(&dir);
    let quota_path = dir.path().join("quota.json");

    let mut chat = ChatController::new(QuotaStore::at(&quota_path), "itest");
    chat.init_greeting(Some(profile.data()));
    assert!(chat.messages()[0].text.contains("Grace Hopper"));

    for i in 0..MAX_USER_MESSAGES {
        assert!(chat.begin_send(&format!("question {i}")));
        chat.apply_fragment("answer");
        chat.finish_stream();
    }
    assert!(chat.is_banned());

    // A fresh session against the same store starts banned
    let mut chat = ChatController::new(QuotaStore::at(&quota_path), "itest");
    chat.init_greeting(Some(profile.data()));
    assert!(chat.is_banned());
    assert!(chat.messages()[0].text.contains("limit"));
    assert!(!chat.begin_send("one more"));
}

#[test]
fn resume_export_writes_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let store = load_profile(&dir);

    let path = dir.path().join(folio::pdf::default_output_path(store.data()));
    folio::pdf::export_resume(store.data(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(path.file_name().unwrap().to_string_lossy().contains("Grace_Hopper"));
}
