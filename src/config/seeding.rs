use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::auth::password::hash_password;
use crate::auth::{Caller, UserRole};
use crate::models::*;
use crate::services::*;

struct DemoUser {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: UserRole,
}

const DEMO_USERS: [DemoUser; 6] = [
    DemoUser { name: "John Trainer", email: "trainer@fitsphere.com", password: "trainer123", role: UserRole::Trainer },
    DemoUser { name: "Sarah Fitness", email: "sarah@fitsphere.com", password: "trainer123", role: UserRole::Trainer },
    DemoUser { name: "Mike Client", email: "client@fitsphere.com", password: "client123", role: UserRole::Client },
    DemoUser { name: "Emma Wilson", email: "emma@fitsphere.com", password: "client123", role: UserRole::Client },
    DemoUser { name: "David Brown", email: "david@fitsphere.com", password: "client123", role: UserRole::Client },
    DemoUser { name: "Admin User", email: "admin@fitsphere.com", password: "admin123", role: UserRole::Admin },
];

/// (trainer index, title, description)
const DEMO_WORKOUTS: [(usize, &str, &str); 6] = [
    (0, "Full Body Strength Training", "A comprehensive full-body workout focusing on compound movements. Includes squats, deadlifts, bench press, and overhead press."),
    (0, "Cardio Blast", "High-intensity cardio session designed to burn calories and improve cardiovascular health. Includes running, cycling, and HIIT exercises."),
    (0, "Core Strength & Stability", "Targeted core workout to improve stability and strength. Includes planks, crunches, Russian twists, and leg raises."),
    (1, "Yoga & Flexibility", "Gentle yoga flow focusing on flexibility, balance, and relaxation. Suitable for all fitness levels."),
    (1, "Upper Body Power", "Intense upper body workout targeting chest, back, shoulders, and arms. Includes pull-ups, push-ups, and weight training exercises."),
    (1, "Leg Day Intensive", "Comprehensive lower body workout focusing on quads, hamstrings, glutes, and calves. Includes squats, lunges, leg presses, and calf raises."),
];

/// (client index, workout index)
const DEMO_ASSIGNMENTS: [(usize, usize); 6] = [(2, 0), (2, 1), (3, 3), (3, 4), (4, 2), (4, 5)];

/// (client index, days ago, weight, calories, notes)
const DEMO_PROGRESS: [(usize, i64, f64, i32, &str); 7] = [
    (2, 7, 75.5, 2500, "Feeling strong after full body workout. Increased weights this week."),
    (2, 3, 75.2, 2300, "Good cardio session. Maintained weight, feeling more energetic."),
    (2, 0, 74.8, 2400, "Great progress! Lost some weight while maintaining strength."),
    (3, 5, 65.0, 2000, "Yoga session was very relaxing. Improved flexibility noticed."),
    (3, 2, 64.8, 2100, "Upper body workout was challenging but rewarding."),
    (4, 4, 82.0, 2800, "Core workout was intense. Feeling stronger in the midsection."),
    (4, 1, 81.5, 2700, "Leg day was tough but completed all sets. Good form maintained."),
];

const DEMO_TIPS: [(&str, &str); 10] = [
    ("Stay Hydrated", "Drink at least 8 glasses of water daily. Proper hydration is essential for performance, recovery, and overall health."),
    ("Get Enough Sleep", "Aim for 7-9 hours of quality sleep each night. Sleep is crucial for muscle recovery and hormone regulation."),
    ("Warm Up Before Exercise", "Always start your workout with a 5-10 minute warm-up of light cardio and dynamic stretching to reduce the risk of injury."),
    ("Eat Balanced Meals", "Include a mix of protein, carbohydrates, and healthy fats in every meal."),
    ("Listen to Your Body", "Rest when you're tired and don't push through pain. Recovery is just as important as training."),
    ("Set Realistic Goals", "Set achievable, measurable goals with specific timelines and break large goals into smaller milestones."),
    ("Include Strength Training", "Building muscle boosts metabolism and improves bone density. Aim for 2-3 strength sessions per week."),
    ("Track Your Progress", "Keep a record of your workouts, measurements, and how you feel to stay accountable."),
    ("Stretch Regularly", "Stretch after workouts to improve flexibility and reduce muscle tension. Hold stretches for 20-30 seconds."),
    ("Stay Consistent", "Moderate exercise done regularly beats intense workouts done sporadically. Find a routine that fits your lifestyle."),
];

/// Populates an empty database with demo accounts and content.
pub struct DatabaseSeeder {
    pool: PgPool,
    bcrypt_cost: u32,
}

impl DatabaseSeeder {
    pub fn new(pool: PgPool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    pub async fn seed_all(&self) -> Result<()> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        if existing > 0 {
            tracing::info!(users = existing, "Database already seeded, skipping");
            return Ok(());
        }

        tracing::info!("Starting database seeding...");

        let users = self.seed_users().await?;
        let workouts = self.seed_workouts(&users).await?;
        self.seed_assignments(&users, &workouts).await?;
        self.seed_progress_logs(&users).await?;
        self.seed_health_tips(&users).await?;

        tracing::info!("Database seeding completed!");
        Ok(())
    }

    async fn seed_users(&self) -> Result<Vec<Caller>> {
        let mut callers = Vec::with_capacity(DEMO_USERS.len());

        for demo in &DEMO_USERS {
            let password = demo.password.to_string();
            let cost = self.bcrypt_cost;
            let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
                .await??;

            let user = sqlx::query_as::<_, User>(
                "INSERT INTO users (name, email, password_hash, role)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, name, email, password_hash, role",
            )
            .bind(demo.name)
            .bind(demo.email)
            .bind(&password_hash)
            .bind(demo.role)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("failed to seed user {}", demo.email))?;

            callers.push(Caller::from(&user));
        }

        tracing::info!(count = callers.len(), "Created demo users");
        Ok(callers)
    }

    async fn seed_workouts(&self, users: &[Caller]) -> Result<Vec<WorkoutResponse>> {
        let service = WorkoutService::new(self.pool.clone());
        let mut workouts = Vec::with_capacity(DEMO_WORKOUTS.len());

        for (trainer, title, description) in DEMO_WORKOUTS {
            let request = CreateWorkoutRequest {
                title: title.to_string(),
                description: Some(description.to_string()),
            };
            workouts.push(service.create(&users[trainer], request).await?);
        }

        tracing::info!(count = workouts.len(), "Created demo workouts");
        Ok(workouts)
    }

    async fn seed_assignments(&self, users: &[Caller], workouts: &[WorkoutResponse]) -> Result<()> {
        let service = AssignmentService::new(self.pool.clone());

        for (client, workout) in DEMO_ASSIGNMENTS {
            let workout = &workouts[workout];
            let trainer = Caller::new(workout.trainer_id, UserRole::Trainer);
            let request = CreateAssignmentRequest {
                client_id: users[client].id,
                workout_id: workout.id,
            };
            service.create(&trainer, request).await?;
        }

        Ok(())
    }

    async fn seed_progress_logs(&self, users: &[Caller]) -> Result<()> {
        let service = ProgressService::new(self.pool.clone());
        let today = Utc::now().date_naive();

        for (client, days_ago, weight, calories, notes) in DEMO_PROGRESS {
            let client = &users[client];
            let request = CreateProgressLogRequest {
                client_id: client.id,
                date: today - Duration::days(days_ago),
                weight: Some(weight),
                calories: Some(calories),
                notes: Some(notes.to_string()),
            };
            service.create(client, request).await?;
        }

        Ok(())
    }

    async fn seed_health_tips(&self, users: &[Caller]) -> Result<()> {
        let service = HealthTipService::new(self.pool.clone());
        let admin = users
            .iter()
            .find(|user| user.role == UserRole::Admin)
            .context("demo data has no admin account")?;

        for (title, content) in DEMO_TIPS {
            let request = CreateHealthTipRequest {
                title: title.to_string(),
                content: content.to_string(),
            };
            service.create(admin, request).await?;
        }

        Ok(())
    }
}
