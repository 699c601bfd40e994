mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::TestApp;

fn titles(workouts: &Value) -> Vec<&str> {
    workouts
        .as_array()
        .unwrap()
        .iter()
        .map(|workout| workout["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_trainer_assigns_leg_day_to_client() {
    let Some(app) = TestApp::spawn().await else { return };
    app.delete_users_by_email(&["t@x.com", "c@x.com"]).await;

    let trainer = app.register_as("Tess Trainer", "t@x.com", "trainer").await;
    let client = app.register_as("Cal Client", "c@x.com", "client").await;

    let (status, workout) = app
        .post(
            "/api/workouts",
            Some(&trainer.token),
            json!({ "title": "Leg Day", "description": "squats and lunges" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(workout["trainer_id"], trainer.id);
    assert_eq!(workout["trainer_name"], "Tess Trainer");

    let assignment = json!({ "client_id": client.id, "workout_id": workout["id"] });
    let (status, created) = app
        .post("/api/assignments", Some(&trainer.token), assignment.clone())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["client_name"], "Cal Client");
    assert_eq!(created["workout_title"], "Leg Day");

    let (status, workouts) = app
        .get(&format!("/api/workouts?user_id={}", client.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&workouts), vec!["Leg Day"]);

    let (status, assigned) = app.get("/api/workouts/assigned", Some(&client.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&assigned), vec!["Leg Day"]);

    let (status, body) = app
        .post("/api/assignments", Some(&trainer.token), assignment)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM assignments WHERE client_id = $1 AND workout_id = $2",
    )
    .bind(client.id)
    .bind(workout["id"].as_i64().unwrap())
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_clients_cannot_manage_workouts() {
    let Some(app) = TestApp::spawn().await else { return };

    let client = app.register("client").await;
    let (status, _) = app
        .post("/api/workouts", Some(&client.token), json!({ "title": "Sneaky" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/workouts/assigned", Some(&client.token)).await;
    assert_eq!(status, StatusCode::OK);

    let trainer = app.register("trainer").await;
    let (status, _) = app.get("/api/workouts/assigned", Some(&trainer.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

fn ids(items: &Value) -> Vec<i64> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_trainer_lists_only_own_workouts() {
    let Some(app) = TestApp::spawn().await else { return };

    let trainer = app.register("trainer").await;
    let other = app.register("trainer").await;
    let own_id = app.create_workout(&trainer, "Mine").await;
    let other_id = app.create_workout(&other, "Theirs").await;

    let (status, workouts) = app
        .get(&format!("/api/workouts?user_id={}", trainer.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&workouts), vec![own_id]);
    assert!(!ids(&workouts).contains(&other_id));
}

#[tokio::test]
async fn test_admin_lists_every_workout() {
    let Some(app) = TestApp::spawn().await else { return };

    let trainer = app.register("trainer").await;
    let admin = app.register("admin").await;
    let workout_id = app.create_workout(&trainer, "Trainer Owned").await;

    let (status, workouts) = app
        .get(&format!("/api/workouts?user_id={}", admin.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&workouts).contains(&workout_id));

    let (_, unscoped) = app.get("/api/workouts", None).await;
    assert!(ids(&unscoped).contains(&workout_id));
}

#[tokio::test]
async fn test_partial_update_keeps_absent_fields() {
    let Some(app) = TestApp::spawn().await else { return };

    let trainer = app.register("trainer").await;
    let workout_id = app.create_workout(&trainer, "Morning Run").await;
    let uri = format!("/api/workouts/{workout_id}");

    let (status, updated) = app
        .put(&uri, &trainer.token, json!({ "title": "Evening Run" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Evening Run");
    assert_eq!(updated["description"], "integration test workout");

    let (status, unchanged) = app.put(&uri, &trainer.token, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged, updated);

    let (status, body) = app.put(&uri, &trainer.token, json!({ "title": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "title");
}

#[tokio::test]
async fn test_trainers_cannot_touch_each_others_workouts() {
    let Some(app) = TestApp::spawn().await else { return };

    let owner = app.register("trainer").await;
    let other = app.register("trainer").await;
    let workout_id = app.create_workout(&owner, "Owner Only").await;
    let uri = format!("/api/workouts/{workout_id}");

    let (status, _) = app.put(&uri, &other.token, json!({ "title": "Taken" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, &other.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, &owner.token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assignment_validation() {
    let Some(app) = TestApp::spawn().await else { return };

    let trainer = app.register("trainer").await;
    let other_trainer = app.register("trainer").await;
    let client = app.register("client").await;
    let workout_id = app.create_workout(&trainer, "Validation").await;

    let (status, body) = app
        .post(
            "/api/assignments",
            Some(&trainer.token),
            json!({ "client_id": other_trainer.id, "workout_id": workout_id }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "client_id");

    let (status, _) = app
        .post(
            "/api/assignments",
            Some(&trainer.token),
            json!({ "client_id": client.id, "workout_id": i64::MAX }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post(
            "/api/assignments",
            Some(&client.token),
            json!({ "client_id": client.id, "workout_id": workout_id }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_assignment_delete_ownership() {
    let Some(app) = TestApp::spawn().await else { return };

    let trainer = app.register("trainer").await;
    let client = app.register("client").await;
    let stranger = app.register("client").await;
    let workout_id = app.create_workout(&trainer, "Ownership").await;

    let (_, assignment) = app
        .post(
            "/api/assignments",
            Some(&trainer.token),
            json!({ "client_id": client.id, "workout_id": workout_id }),
        )
        .await;
    let uri = format!("/api/assignments/{}", assignment["id"]);

    let (status, _) = app.delete(&uri, &stranger.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, &trainer.token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete(&uri, &trainer.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_progress_logs_are_newest_first() {
    let Some(app) = TestApp::spawn().await else { return };

    let client = app.register("client").await;
    for (date, weight) in [("2024-01-01", 80.0), ("2024-03-01", 78.5), ("2024-02-01", 79.0)] {
        let (status, _) = app
            .post(
                "/api/progress",
                Some(&client.token),
                json!({ "client_id": client.id, "date": date, "weight": weight, "calories": 2200 }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, logs) = app
        .get(&format!("/api/progress?client_id={}", client.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let logs = logs.as_array().unwrap();
    let dates: Vec<&str> = logs.iter().map(|log| log["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
    assert!(logs.iter().all(|log| log["client_id"] == client.id));
}

#[tokio::test]
async fn test_same_day_progress_logs_keep_insertion_order() {
    let Some(app) = TestApp::spawn().await else { return };

    let client = app.register("client").await;
    let mut same_day = Vec::new();
    for calories in [1800, 1900, 2000] {
        let (status, log) = app
            .post(
                "/api/progress",
                Some(&client.token),
                json!({ "client_id": client.id, "date": "2024-06-01", "calories": calories }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        same_day.push(log["id"].as_i64().unwrap());
    }
    let (_, later) = app
        .post(
            "/api/progress",
            Some(&client.token),
            json!({ "client_id": client.id, "date": "2024-06-02" }),
        )
        .await;

    let (status, logs) = app
        .get(&format!("/api/progress?client_id={}", client.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let mut expected = vec![later["id"].as_i64().unwrap()];
    expected.extend(same_day);
    assert_eq!(ids(&logs), expected);
}

#[tokio::test]
async fn test_progress_for_unknown_client_is_not_found() {
    let Some(app) = TestApp::spawn().await else { return };

    let admin = app.register("admin").await;
    let (status, body) = app
        .post(
            "/api/progress",
            Some(&admin.token),
            json!({ "client_id": i64::MAX, "date": "2024-06-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_progress_log_access() {
    let Some(app) = TestApp::spawn().await else { return };

    let client = app.register("client").await;
    let other = app.register("client").await;

    let (status, _) = app
        .post(
            "/api/progress",
            Some(&other.token),
            json!({ "client_id": client.id, "date": "2024-05-01" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(
            "/api/progress",
            Some(&client.token),
            json!({ "client_id": client.id, "date": "2024-05-01", "weight": -1.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "weight");

    let (status, log) = app
        .post(
            "/api/progress",
            Some(&client.token),
            json!({ "client_id": client.id, "date": "2024-05-01", "notes": "felt good" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/progress/{}", log["id"]);

    let (status, fetched) = app.get(&uri, Some(&client.token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, log);

    let (status, _) = app.get(&uri, Some(&other.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, &other.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, &client.token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_deleting_trainer_cascades_to_workouts_and_assignments() {
    let Some(app) = TestApp::spawn().await else { return };

    let trainer = app.register("trainer").await;
    let client = app.register("client").await;
    let workout_id = app.create_workout(&trainer, "Cascade").await;
    let (status, _) = app
        .post(
            "/api/assignments",
            Some(&trainer.token),
            json!({ "client_id": client.id, "workout_id": workout_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.delete(&format!("/api/users/{}", trainer.id), &trainer.token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/workouts/{workout_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, assignments) = app
        .get(&format!("/api/assignments?user_id={}", client.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(assignments.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_tips_are_admin_only() {
    let Some(app) = TestApp::spawn().await else { return };

    let client = app.register("client").await;
    let tip = json!({ "title": "Hydrate", "content": "Drink water before training." });

    let (status, body) = app
        .post("/api/health-tips", Some(&client.token), tip.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "insufficient role");

    let admin = app.register("admin").await;
    let (status, created) = app.post("/api/health-tips", Some(&admin.token), tip).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, fetched) = app
        .get(&format!("/api/health-tips/{}", created["id"]), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, tips) = app.get("/api/health-tips", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(tips.as_array().unwrap().contains(&created));
}
