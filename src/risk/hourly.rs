//! Hour-by-hour risk curve for a single work task over the 06:00-18:00 shift.

use std::ops::RangeInclusive;

const SHIFT_HOURS: RangeInclusive<u32> = 6..=18;
const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 100;
const DEFAULT_REASON: &str = "general safe working window";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskProfile {
    pub process: String,
    pub workers: u32,
    pub progress_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourlyRiskLevel {
    Low,
    Medium,
    High,
}

impl HourlyRiskLevel {
    pub fn from_score(score: i32) -> Self {
        match score {
            i32::MIN..=30 => HourlyRiskLevel::Low,
            31..=70 => HourlyRiskLevel::Medium,
            _ => HourlyRiskLevel::High,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HourlyRiskLevel::Low => "Low",
            HourlyRiskLevel::Medium => "Medium",
            HourlyRiskLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyRisk {
    pub hour: u32,
    pub score: i32,
}

impl HourlyRisk {
    pub fn level(&self) -> HourlyRiskLevel {
        HourlyRiskLevel::from_score(self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub reason: String,
}

/// Scores every shift hour. `month` is 1-based and drives seasonal weighting.
pub fn hourly_profile(task: &TaskProfile, base_score: i32, month: u32) -> Vec<HourlyRisk> {
    SHIFT_HOURS
        .map(|hour| HourlyRisk {
            hour,
            score: score_for_hour(hour, task, base_score, month),
        })
        .collect()
}

fn score_for_hour(hour: u32, task: &TaskProfile, base_score: i32, month: u32) -> i32 {
    // widened so extreme base scores clamp instead of overflowing
    let adjusted = i64::from(base_score)
        + i64::from(time_of_day_adjustment(hour))
        + i64::from(process_adjustment(hour, &task.process))
        + i64::from(seasonal_adjustment(hour, month))
        + i64::from(crew_adjustment(hour, task.workers))
        + i64::from(progress_adjustment(hour, task.progress_rate));
    adjusted.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE)) as i32
}

fn time_of_day_adjustment(hour: u32) -> i32 {
    match hour {
        6..=7 => -5,
        8..=10 => 0,
        11..=12 => 5,
        13..=14 => 3,
        15..=16 => 8,
        17..=18 => 2,
        _ => 0,
    }
}

fn process_adjustment(hour: u32, process: &str) -> i32 {
    let process = process.to_lowercase();

    if is_height_work(&process) {
        if hour >= 14 {
            return 10;
        }
        if hour >= 12 {
            return 5;
        }
    }
    if process.contains("용접") || process.contains("welding") {
        if hour >= 15 {
            return 8;
        }
        if hour >= 13 {
            return 4;
        }
    }
    if process.contains("굴착") || process.contains("excavation") {
        if hour >= 16 {
            return 6;
        }
        if hour >= 14 {
            return 3;
        }
    }
    0
}

fn is_height_work(process: &str) -> bool {
    process.contains("고소") || process.contains("height")
}

fn seasonal_adjustment(hour: u32, month: u32) -> i32 {
    match month {
        6..=8 if hour >= 14 => 5,
        6..=8 if hour >= 12 => 3,
        12 | 1 | 2 if hour <= 7 || hour >= 17 => 4,
        _ => 0,
    }
}

fn crew_adjustment(hour: u32, workers: u32) -> i32 {
    if workers > 30 {
        if hour >= 15 {
            return 6;
        }
        if hour >= 13 {
            return 3;
        }
    } else if workers > 15 {
        if hour >= 16 {
            return 4;
        }
        if hour >= 14 {
            return 2;
        }
    }
    0
}

fn progress_adjustment(hour: u32, progress: u32) -> i32 {
    if progress <= 20 {
        if hour >= 15 {
            return 5;
        }
        if hour >= 13 {
            return 2;
        }
    }
    if progress >= 80 {
        if hour >= 16 {
            return 4;
        }
        if hour >= 14 {
            return 2;
        }
    }
    0
}

/// Picks the calmest low-risk hour, falling back to the calmest medium hour,
/// and widens it into a work window clipped to the shift.
pub fn recommend_work_window(task: &TaskProfile, base_score: i32, month: u32) -> WorkWindow {
    let profile = hourly_profile(task, base_score, month);

    for level in [HourlyRiskLevel::Low, HourlyRiskLevel::Medium] {
        // min_by_key keeps the earliest hour on ties
        let best = profile
            .iter()
            .filter(|entry| entry.level() == level)
            .min_by_key(|entry| entry.score);
        if let Some(best) = best {
            return WorkWindow {
                start_hour: best.hour.saturating_sub(1).max(*SHIFT_HOURS.start()),
                end_hour: (best.hour + 2).min(*SHIFT_HOURS.end()),
                reason: recommendation_reason(best.hour, task),
            };
        }
    }

    WorkWindow {
        start_hour: 8,
        end_hour: 12,
        reason: DEFAULT_REASON.to_string(),
    }
}

fn recommendation_reason(hour: u32, task: &TaskProfile) -> String {
    let mut reasons: Vec<&str> = Vec::new();

    if hour <= 10 {
        reasons.push("fatigue is low in the morning");
    }
    if hour >= 16 {
        reasons.push("late afternoon fatigue raises risk");
    }
    if is_height_work(&task.process.to_lowercase()) {
        reasons.push("work at height is safer in the morning");
    }
    if task.workers > 20 {
        reasons.push("large crews add afternoon risk");
    }

    if reasons.is_empty() {
        DEFAULT_REASON.to_string()
    } else {
        reasons.join(", ")
    }
}
