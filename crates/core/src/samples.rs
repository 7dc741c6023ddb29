//! Showcase data displayed when a user has not recorded anything yet.
//!
//! Sample records are never persisted and are always flagged as samples in
//! views, so they cannot be mistaken for (or edited as) real rows.

use chrono::Duration;
use serde::Serialize;

use crate::care::TaskType;
use crate::types::Timestamp;

/// A showcase plant card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplePlant {
    pub id: &'static str,
    pub name: &'static str,
    pub species: &'static str,
    pub image_url: &'static str,
    pub location: &'static str,
    pub acquired_date: &'static str,
}

/// A showcase upcoming task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleTask {
    pub id: &'static str,
    pub task_type: TaskType,
    pub due_date: Timestamp,
    pub plant_name: &'static str,
    pub plant_image_url: &'static str,
}

const MONSTERA_IMAGE: &str =
    "https://images.unsplash.com/photo-1614594975525-e45190c55d0b?w=400&q=80";
const SNAKE_PLANT_IMAGE: &str =
    "https://images.unsplash.com/photo-1572688484438-313a6e50c333?w=400&q=80";
const FIDDLE_LEAF_IMAGE: &str =
    "https://images.unsplash.com/photo-1597055181449-b9d2a4598b52?w=400&q=80";
const POTHOS_IMAGE: &str =
    "https://images.unsplash.com/photo-1622398925373-3f91b1e275f5?w=400&q=80";
const PEACE_LILY_IMAGE: &str =
    "https://images.unsplash.com/photo-1616690248363-76f93926cf6e?w=400&q=80";
const ZZ_PLANT_IMAGE: &str =
    "https://images.unsplash.com/photo-1632207691143-7ee8c82f6e9f?w=400&q=80";

/// The fixed plant collection shown on an empty plant list.
pub const SAMPLE_PLANTS: [SamplePlant; 6] = [
    SamplePlant {
        id: "sample-1",
        name: "Monstera Deliciosa",
        species: "Monstera Deliciosa",
        image_url: MONSTERA_IMAGE,
        location: "Living Room",
        acquired_date: "2023-01-15",
    },
    SamplePlant {
        id: "sample-2",
        name: "Snake Plant",
        species: "Sansevieria Trifasciata",
        image_url: SNAKE_PLANT_IMAGE,
        location: "Bedroom",
        acquired_date: "2023-03-22",
    },
    SamplePlant {
        id: "sample-3",
        name: "Fiddle Leaf Fig",
        species: "Ficus Lyrata",
        image_url: FIDDLE_LEAF_IMAGE,
        location: "Office",
        acquired_date: "2022-11-05",
    },
    SamplePlant {
        id: "sample-4",
        name: "Pothos",
        species: "Epipremnum Aureum",
        image_url: POTHOS_IMAGE,
        location: "Kitchen",
        acquired_date: "2023-05-10",
    },
    SamplePlant {
        id: "sample-5",
        name: "Peace Lily",
        species: "Spathiphyllum",
        image_url: PEACE_LILY_IMAGE,
        location: "Bathroom",
        acquired_date: "2023-02-28",
    },
    SamplePlant {
        id: "sample-6",
        name: "ZZ Plant",
        species: "Zamioculcas Zamiifolia",
        image_url: ZZ_PLANT_IMAGE,
        location: "Home Office",
        acquired_date: "2022-12-12",
    },
];

/// Number of sample plants shown on the dashboard overview.
pub const DASHBOARD_SAMPLE_PLANTS: usize = 3;

/// Number of sample tasks shown on the dashboard overview.
pub const DASHBOARD_SAMPLE_TASKS: usize = 2;

/// Sample plants for the plant list page.
pub fn sample_plants() -> Vec<SamplePlant> {
    SAMPLE_PLANTS.to_vec()
}

/// Upcoming sample tasks, due one day apart starting tomorrow.
pub fn sample_tasks(now: Timestamp) -> Vec<SampleTask> {
    let specs: [(&'static str, TaskType, &'static str, &'static str); 5] = [
        ("task-1", TaskType::Water, "Monstera Deliciosa", MONSTERA_IMAGE),
        ("task-2", TaskType::Fertilize, "Fiddle Leaf Fig", FIDDLE_LEAF_IMAGE),
        ("task-3", TaskType::Water, "Snake Plant", SNAKE_PLANT_IMAGE),
        ("task-4", TaskType::Prune, "Pothos", POTHOS_IMAGE),
        ("task-5", TaskType::Water, "Peace Lily", PEACE_LILY_IMAGE),
    ];

    specs
        .into_iter()
        .zip(1i64..)
        .map(|((id, task_type, plant_name, plant_image_url), days)| SampleTask {
            id,
            task_type,
            due_date: now + Duration::days(days),
            plant_name,
            plant_image_url,
        })
        .collect()
}
