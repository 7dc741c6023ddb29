//! Repository tests against an in-memory SQLite database with all
//! migrations applied.

use chrono::{Duration, Utc};
use plantpal_core::care::{completed_now, TaskType};
use plantpal_db::models::care_task::CreateCareTask;
use plantpal_db::models::growth_entry::CreateGrowthEntry;
use plantpal_db::models::plant::CreatePlant;
use plantpal_db::models::session::CreateSession;
use plantpal_db::models::user::{CreateUser, UpdateProfile};
use plantpal_db::repositories::{CareTaskRepo, GrowthEntryRepo, PlantRepo, SessionRepo, UserRepo};
use plantpal_db::DbPool;

async fn test_pool() -> DbPool {
    let pool = plantpal_db::create_pool("sqlite::memory:")
        .await
        .expect("in-memory pool");
    plantpal_db::run_migrations(&pool)
        .await
        .expect("migrations apply");
    pool
}

async fn seed_user(pool: &DbPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            full_name: None,
        },
    )
    .await
    .expect("user insert")
    .id
}

fn plant(name: &str) -> CreatePlant {
    CreatePlant {
        name: name.to_string(),
        species: Some("Monstera deliciosa".to_string()),
        image_url: None,
        location: Some("Living Room".to_string()),
        acquired_date: None,
        notes: None,
    }
}

fn task_done_now(task_type: TaskType) -> CreateCareTask {
    let times = completed_now(Utc::now());
    CreateCareTask {
        task_type,
        due_date: times.due_date,
        completed: true,
        completed_date: Some(times.completed_date),
        notes: None,
    }
}

fn task_due_in(days: i64) -> CreateCareTask {
    CreateCareTask {
        task_type: TaskType::Water,
        due_date: Utc::now() + Duration::days(days),
        completed: false,
        completed_date: None,
        notes: None,
    }
}

// ---------------------------------------------------------------------------
// Users & sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_email_is_a_unique_violation() {
    let pool = test_pool().await;
    seed_user(&pool, "ana@example.com").await;

    let err = UserRepo::create(
        &pool,
        &CreateUser {
            email: "ana@example.com".to_string(),
            password_hash: "other".to_string(),
            full_name: None,
        },
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert!(db_err.is_unique_violation());
}

#[tokio::test]
async fn profile_update_overwrites_fields() {
    let pool = test_pool().await;
    let id = seed_user(&pool, "ana@example.com").await;

    let updated = UserRepo::update_profile(
        &pool,
        id,
        &UpdateProfile {
            full_name: Some("Ana Verde".to_string()),
            bio: Some("Collector of ferns".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.full_name.as_deref(), Some("Ana Verde"));

    let cleared = UserRepo::update_profile(
        &pool,
        id,
        &UpdateProfile {
            full_name: Some("Ana Verde".to_string()),
            bio: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.bio, None);
}

#[tokio::test]
async fn revoked_and_expired_sessions_are_not_active() {
    let pool = test_pool().await;
    let user_id = seed_user(&pool, "ana@example.com").await;

    let live = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id,
            expires_at: Utc::now() + Duration::hours(1),
            user_agent: None,
        },
    )
    .await
    .unwrap();
    let expired = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id,
            expires_at: Utc::now() - Duration::hours(1),
            user_agent: None,
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_active(&pool, live.id).await.unwrap().is_some());
    assert!(SessionRepo::find_active(&pool, expired.id).await.unwrap().is_none());

    assert!(SessionRepo::revoke(&pool, live.id).await.unwrap());
    assert!(SessionRepo::find_active(&pool, live.id).await.unwrap().is_none());
    assert!(!SessionRepo::revoke(&pool, live.id).await.unwrap());

    assert_eq!(SessionRepo::cleanup_expired(&pool).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Plants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn plants_are_listed_newest_first_and_scoped_to_owner() {
    let pool = test_pool().await;
    let ana = seed_user(&pool, "ana@example.com").await;
    let ben = seed_user(&pool, "ben@example.com").await;

    PlantRepo::create(&pool, ana, &plant("First")).await.unwrap();
    PlantRepo::create(&pool, ana, &plant("Second")).await.unwrap();
    let bens = PlantRepo::create(&pool, ben, &plant("Ben's")).await.unwrap();

    let listed = PlantRepo::list_for_user(&pool, ana, None).await.unwrap();
    let names: Vec<_> = listed.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Second", "First"]);

    assert_eq!(PlantRepo::list_for_user(&pool, ana, Some(1)).await.unwrap().len(), 1);
    assert_eq!(PlantRepo::count_for_user(&pool, ana).await.unwrap(), 2);
    assert!(PlantRepo::find_for_user(&pool, bens.id, ana).await.unwrap().is_none());
}

#[tokio::test]
async fn blank_plant_name_rejected_by_schema() {
    let pool = test_pool().await;
    let ana = seed_user(&pool, "ana@example.com").await;

    let result = PlantRepo::create(&pool, ana, &plant("   ")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn update_overwrites_fields_and_bumps_updated_at() {
    let pool = test_pool().await;
    let ana = seed_user(&pool, "ana@example.com").await;
    let created = PlantRepo::create(&pool, ana, &plant("Monstera")).await.unwrap();

    let mut edit = plant("Big Monstera");
    edit.location = None;
    let updated = PlantRepo::update(&pool, created.id, ana, &edit)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Big Monstera");
    assert_eq!(updated.location, None);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_of_foreign_plant_returns_none() {
    let pool = test_pool().await;
    let ana = seed_user(&pool, "ana@example.com").await;
    let ben = seed_user(&pool, "ben@example.com").await;
    let created = PlantRepo::create(&pool, ana, &plant("Monstera")).await.unwrap();

    let result = PlantRepo::update(&pool, created.id, ben, &plant("Stolen"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_cascade_removes_plant_entries_and_tasks() {
    let pool = test_pool().await;
    let ana = seed_user(&pool, "ana@example.com").await;
    let doomed = PlantRepo::create(&pool, ana, &plant("Doomed")).await.unwrap();
    let kept = PlantRepo::create(&pool, ana, &plant("Kept")).await.unwrap();

    for id in [doomed.id, kept.id] {
        GrowthEntryRepo::create(&pool, id, &CreateGrowthEntry::default())
            .await
            .unwrap();
        CareTaskRepo::create(&pool, id, &task_done_now(TaskType::Water))
            .await
            .unwrap();
    }

    assert!(PlantRepo::delete_cascade(&pool, doomed.id, ana).await.unwrap());

    assert!(PlantRepo::find_for_user(&pool, doomed.id, ana).await.unwrap().is_none());
    assert!(GrowthEntryRepo::list_by_plant(&pool, doomed.id).await.unwrap().is_empty());
    assert!(CareTaskRepo::list_history_by_plant(&pool, doomed.id).await.unwrap().is_empty());

    assert_eq!(GrowthEntryRepo::list_by_plant(&pool, kept.id).await.unwrap().len(), 1);
    assert_eq!(CareTaskRepo::list_history_by_plant(&pool, kept.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_cascade_ignores_foreign_plant() {
    let pool = test_pool().await;
    let ana = seed_user(&pool, "ana@example.com").await;
    let ben = seed_user(&pool, "ben@example.com").await;
    let created = PlantRepo::create(&pool, ana, &plant("Monstera")).await.unwrap();

    assert!(!PlantRepo::delete_cascade(&pool, created.id, ben).await.unwrap());
    assert!(PlantRepo::find_for_user(&pool, created.id, ana).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Growth entries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zero_measurements_are_stored_as_present() {
    let pool = test_pool().await;
    let ana = seed_user(&pool, "ana@example.com").await;
    let p = PlantRepo::create(&pool, ana, &plant("Seedling")).await.unwrap();

    let entry = GrowthEntryRepo::create(
        &pool,
        p.id,
        &CreateGrowthEntry {
            height: Some(0.0),
            num_leaves: Some(0),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(entry.height, Some(0.0));
    assert_eq!(entry.num_leaves, Some(0));
    assert_eq!(entry.entry_date, entry.created_at);
}

// ---------------------------------------------------------------------------
// Care tasks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recorded_task_is_complete_with_matching_dates() {
    let pool = test_pool().await;
    let ana = seed_user(&pool, "ana@example.com").await;
    let p = PlantRepo::create(&pool, ana, &plant("Pothos")).await.unwrap();

    let task = CareTaskRepo::create(&pool, p.id, &task_done_now(TaskType::Fertilize))
        .await
        .unwrap();

    assert!(task.completed);
    assert_eq!(task.completed_date, Some(task.due_date));
    assert_eq!(task.kind(), Some(TaskType::Fertilize));
}

#[tokio::test]
async fn last_watered_picks_latest_water_task() {
    let pool = test_pool().await;
    let ana = seed_user(&pool, "ana@example.com").await;
    let p = PlantRepo::create(&pool, ana, &plant("Fern")).await.unwrap();

    assert!(CareTaskRepo::last_completed_of_type(&pool, p.id, TaskType::Water)
        .await
        .unwrap()
        .is_none());

    CareTaskRepo::create(&pool, p.id, &task_done_now(TaskType::Water)).await.unwrap();
    let latest = CareTaskRepo::create(&pool, p.id, &task_done_now(TaskType::Water))
        .await
        .unwrap();
    CareTaskRepo::create(&pool, p.id, &task_done_now(TaskType::Prune)).await.unwrap();

    let found = CareTaskRepo::last_completed_of_type(&pool, p.id, TaskType::Water)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, latest.id);
}

#[tokio::test]
async fn upcoming_tasks_are_incomplete_and_ordered_by_due_date() {
    let pool = test_pool().await;
    let ana = seed_user(&pool, "ana@example.com").await;
    let p = PlantRepo::create(&pool, ana, &plant("Peace Lily")).await.unwrap();

    let later = CareTaskRepo::create(&pool, p.id, &task_due_in(3)).await.unwrap();
    let sooner = CareTaskRepo::create(&pool, p.id, &task_due_in(1)).await.unwrap();
    CareTaskRepo::create(&pool, p.id, &task_done_now(TaskType::Water)).await.unwrap();

    let upcoming = CareTaskRepo::list_upcoming_for_user(&pool, ana, None).await.unwrap();
    let ids: Vec<_> = upcoming.iter().map(|t| t.task.id).collect();
    assert_eq!(ids, [sooner.id, later.id]);
    assert_eq!(upcoming[0].plant_name, "Peace Lily");

    let limited = CareTaskRepo::list_upcoming_for_user(&pool, ana, Some(1)).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn complete_marks_task_done_once() {
    let pool = test_pool().await;
    let ana = seed_user(&pool, "ana@example.com").await;
    let ben = seed_user(&pool, "ben@example.com").await;
    let p = PlantRepo::create(&pool, ana, &plant("ZZ Plant")).await.unwrap();
    let task = CareTaskRepo::create(&pool, p.id, &task_due_in(2)).await.unwrap();

    assert!(CareTaskRepo::complete(&pool, task.id, ben).await.unwrap().is_none());

    let done = CareTaskRepo::complete(&pool, task.id, ana).await.unwrap().unwrap();
    assert!(done.completed);
    let first_completion = done.completed_date.unwrap();

    let again = CareTaskRepo::complete(&pool, task.id, ana).await.unwrap().unwrap();
    assert_eq!(again.completed_date, Some(first_completion));

    let recent = CareTaskRepo::list_recently_completed_for_user(&pool, ana, 10)
        .await
        .unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(
        CareTaskRepo::count_completed_by_type_for_user(&pool, ana, TaskType::Water)
            .await
            .unwrap(),
        1
    );
}
