#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! End-to-end coverage for dataset generation, writing, and loading.

use camino::{Utf8Path, Utf8PathBuf};
use mingle_data::{Generator, LoadError, load_store, read_users, write_events_csv, write_users_csv};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn workspace() -> TempDir {
    TempDir::new().expect("create tempdir")
}

fn utf8_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf8 dataset path")
}

#[rstest]
fn generated_datasets_survive_a_round_trip(workspace: TempDir) {
    let users_path = utf8_path(&workspace, "fake_users.csv");
    let events_path = utf8_path(&workspace, "fake_events.csv");

    let mut generator = Generator::seeded(42);
    let users = generator.users(30).expect("generate users");
    let events = generator.events(&users, 12).expect("generate events");
    write_users_csv(&users_path, &users).expect("write users");
    write_events_csv(&events_path, &events).expect("write events");

    let store = load_store(&users_path, &events_path).expect("load datasets");
    assert_eq!(store.user_count(), 30);
    assert_eq!(store.events().len(), 12);
    let reloaded = store.user(7).expect("user 7 exists");
    let original = users.iter().find(|user| user.id == 7).expect("generated");
    assert_eq!(reloaded, original);
}

#[rstest]
fn pandas_style_rows_decode(workspace: TempDir) {
    let users_path = utf8_path(&workspace, "users.csv");
    std::fs::write(
        users_path.as_std_path(),
        "user_id,name,age,location_lat,location_lon,hobbies,is_online,available_weekends,available_weekdays\n\
         0,Ada Alves,30,40.7,-74.0,\"['hiking', 'chess']\",True,False,True\n",
    )
    .expect("write fixture");

    let users = read_users(&users_path).expect("decode pandas-style row");
    let user = users.first().expect("one row");
    assert!(user.is_online);
    assert!(!user.available_weekends);
    assert!(user.hobbies.contains("chess"));
}

#[rstest]
fn empty_hobby_lists_are_fatal(workspace: TempDir) {
    let users_path = utf8_path(&workspace, "users.csv");
    std::fs::write(
        users_path.as_std_path(),
        "user_id,name,age,location_lat,location_lon,hobbies,is_online,available_weekends,available_weekdays\n\
         0,Ada Alves,30,40.7,-74.0,[],True,False,True\n",
    )
    .expect("write fixture");

    let err = read_users(&users_path).expect_err("empty hobbies must fail");
    assert!(matches!(
        err,
        LoadError::InvalidProfile { user_id: 0, .. }
    ));
}

#[rstest]
fn malformed_booleans_are_fatal(workspace: TempDir) {
    let users_path = utf8_path(&workspace, "users.csv");
    std::fs::write(
        users_path.as_std_path(),
        "user_id,name,age,location_lat,location_lon,hobbies,is_online,available_weekends,available_weekdays\n\
         0,Ada Alves,30,40.7,-74.0,\"['hiking']\",maybe,False,True\n",
    )
    .expect("write fixture");

    let err = read_users(&users_path).expect_err("bad boolean must fail");
    assert!(matches!(err, LoadError::Decode { .. }));
}

#[rstest]
fn dangling_event_hosts_are_fatal(workspace: TempDir) {
    let users_path = utf8_path(&workspace, "users.csv");
    let events_path = utf8_path(&workspace, "events.csv");
    std::fs::write(
        users_path.as_std_path(),
        "user_id,name,age,location_lat,location_lon,hobbies,is_online,available_weekends,available_weekdays\n\
         0,Ada Alves,30,40.7,-74.0,\"['hiking']\",True,False,True\n",
    )
    .expect("write fixture");
    std::fs::write(
        events_path.as_std_path(),
        "event_id,title,host_id,hobby,location_lat,location_lon\n\
         0,Evening chess meetup,99,chess,40.7,-74.0\n",
    )
    .expect("write fixture");

    let err = load_store(&users_path, &events_path).expect_err("dangling host must fail");
    assert!(matches!(err, LoadError::Integrity { .. }));
}

#[rstest]
fn missing_files_are_reported_with_their_path(workspace: TempDir) {
    let users_path = utf8_path(&workspace, "absent.csv");
    let err = read_users(&users_path).expect_err("missing file must fail");
    match err {
        LoadError::Open { path, .. } => assert_eq!(path, users_path),
        other => panic!("expected Open error, found {other:?}"),
    }
}

#[rstest]
fn generation_is_deterministic_across_processes(workspace: TempDir) {
    let first_path = utf8_path(&workspace, "first.csv");
    let second_path = utf8_path(&workspace, "second.csv");

    let users_a = Generator::seeded(7).users(5).expect("generate");
    let users_b = Generator::seeded(7).users(5).expect("generate");
    write_users_csv(&first_path, &users_a).expect("write");
    write_users_csv(&second_path, &users_b).expect("write");

    let bytes_a = std::fs::read(first_path.as_std_path()).expect("read back");
    let bytes_b = std::fs::read(second_path.as_std_path()).expect("read back");
    assert_eq!(bytes_a, bytes_b);
}

#[rstest]
fn loading_accepts_relative_paths() {
    // `Utf8Path::new` on a bare file name exercises the parent-directory
    // fallback in the writer.
    let dir = TempDir::new().expect("create tempdir");
    let users = Generator::seeded(1).users(3).expect("generate");
    let previous = std::env::current_dir().expect("cwd");
    std::env::set_current_dir(dir.path()).expect("enter tempdir");
    let written = write_users_csv(Utf8Path::new("users.csv"), &users);
    let loaded = read_users(Utf8Path::new("users.csv"));
    std::env::set_current_dir(previous).expect("restore cwd");
    written.expect("write with a bare file name");
    assert_eq!(loaded.expect("read back").len(), 3);
}
