use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn row(weather: &str, construction_type: &str, process: &str) -> RiskRow {
    RiskRow {
        weather: weather.to_string(),
        temperature: 20.0,
        humidity: 50.0,
        construction_type: construction_type.to_string(),
        process: process.to_string(),
        progress_rate: 50.0,
        worker_count: 20,
    }
}

#[test]
fn test_bands_follow_thresholds() {
    assert_eq!(temperature_band(-1.0), 3);
    assert_eq!(temperature_band(36.0), 3);
    assert_eq!(temperature_band(4.9), 2);
    assert_eq!(temperature_band(31.0), 2);
    assert_eq!(temperature_band(9.0), 1);
    assert_eq!(temperature_band(26.0), 1);
    assert_eq!(temperature_band(10.0), 0);
    assert_eq!(temperature_band(25.0), 0);

    assert_eq!(humidity_band(10.0), 2);
    assert_eq!(humidity_band(95.0), 2);
    assert_eq!(humidity_band(25.0), 1);
    assert_eq!(humidity_band(85.0), 1);
    assert_eq!(humidity_band(50.0), 0);

    assert_eq!(progress_band(5.0), 2);
    assert_eq!(progress_band(15.0), 1);
    assert_eq!(progress_band(80.0), 0);
    assert_eq!(progress_band(80.5), 1);
    assert_eq!(progress_band(91.0), 2);

    assert_eq!(worker_band(4), 3);
    assert_eq!(worker_band(101), 3);
    assert_eq!(worker_band(7), 1);
    assert_eq!(worker_band(60), 1);
    assert_eq!(worker_band(30), 0);
}

#[test]
fn test_construction_lookup_uses_prefix_only() {
    let weights = WeightTables::default();
    assert_eq!(weights.construction_weight("터널/기타"), 4);
    assert_eq!(
        weights.construction_weight("터널/기타"),
        weights.construction_weight("터널")
    );
    assert_eq!(construction_category("옹벽 및 절토사면/옹벽"), "옹벽 및 절토사면");
    assert_eq!(construction_category("댐"), "댐");
}

#[test]
fn test_unmapped_values_use_table_defaults() {
    let weights = WeightTables::default();
    assert_eq!(weights.process_weight("기초공사"), 1);
    assert_eq!(weights.weather_weight("우박"), 0);
    assert_eq!(weights.construction_weight("우주정거장/기타"), 0);
}

#[test]
fn test_weather_aliases_resolve_to_korean_table() {
    let weights = WeightTables::default();
    assert_eq!(weights.weather_weight("강설"), 5);
    assert_eq!(weights.weather_weight("snowy"), 5);
    assert_eq!(weights.weather_weight("Blizzard"), 5);
    assert_eq!(Weather::from_label("rainy"), Some(Weather::Downpour));
    assert_eq!(Weather::from_label("hail"), None);
}

#[test]
fn test_weighted_sum_breakdown() {
    let mut sample = row("강우", "교량/도로교량", "고소, 접근");
    sample.temperature = 33.0;
    sample.humidity = 95.0;
    sample.progress_rate = 5.0;
    sample.worker_count = 3;

    let breakdown = weighted_sum(&sample, &WeightTables::default());
    assert_eq!(breakdown.base, 2);
    assert_eq!(breakdown.weather, 3);
    assert_eq!(breakdown.temperature, 2);
    assert_eq!(breakdown.humidity, 2);
    assert_eq!(breakdown.construction, 3);
    assert_eq!(breakdown.process, 6);
    assert_eq!(breakdown.progress, 2);
    assert_eq!(breakdown.workers, 3);
    assert_eq!(breakdown.total(), 23);
}

#[test]
fn test_calm_row_scores_base_plus_process_default() {
    let breakdown = weighted_sum(&row("맑음", "도로", "미등록 공정"), &DEFAULT_WEIGHTS);
    assert_eq!(breakdown.total(), 3);
}

#[test]
fn test_risk_index_always_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let weights = WeightTables::default();
    let sample = row("안개", "댐/다목적댐", "해체, 철거");
    for _ in 0..5_000 {
        let score = calculate_risk_index(&sample, &weights, &mut rng);
        assert!((1..=30).contains(&score.index));
        assert!(score.bucket.range().contains(&score.index));
        assert_eq!(RiskBucket::for_index(score.index), score.bucket);
        assert!((-3..=3).contains(&score.perturbation));
    }
}

#[test]
fn test_bucket_frequencies_match_plan() {
    let mut rng = StdRng::seed_from_u64(2024);
    let weights = WeightTables::default();
    let sample = row("흐림", "건축물/공동주택", "정리");
    let draws = 20_000;
    let mut counts = [0usize; 3];
    for _ in 0..draws {
        match calculate_risk_index(&sample, &weights, &mut rng).bucket {
            RiskBucket::Safe => counts[0] += 1,
            RiskBucket::Moderate => counts[1] += 1,
            RiskBucket::High => counts[2] += 1,
        }
    }
    let share = |n: usize| n as f64 / draws as f64;
    assert!((share(counts[0]) - 0.70).abs() < 0.02, "safe share {}", share(counts[0]));
    assert!((share(counts[1]) - 0.20).abs() < 0.02, "moderate share {}", share(counts[1]));
    assert!((share(counts[2]) - 0.10).abs() < 0.02, "high share {}", share(counts[2]));
}

#[test]
fn test_index_ignores_weighted_sum() {
    let weights = WeightTables::default();
    let calm = row("맑음", "도로", "마감, 도장");
    let mut severe = row("강설", "터널/철도터널", "고소, 접근");
    severe.temperature = -10.0;
    severe.worker_count = 200;

    let mut a = StdRng::seed_from_u64(99);
    let mut b = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let calm_score = calculate_risk_index(&calm, &weights, &mut a);
        let severe_score = calculate_risk_index(&severe, &weights, &mut b);
        assert_eq!(calm_score.index, severe_score.index);
        assert!(calm_score.breakdown.total() < severe_score.breakdown.total());
    }
}

#[test]
fn test_bucket_classification_of_existing_values() {
    assert_eq!(RiskBucket::for_index(0), RiskBucket::Safe);
    assert_eq!(RiskBucket::for_index(10), RiskBucket::Safe);
    assert_eq!(RiskBucket::for_index(11), RiskBucket::Moderate);
    assert_eq!(RiskBucket::for_index(20), RiskBucket::Moderate);
    assert_eq!(RiskBucket::for_index(21), RiskBucket::High);
    assert_eq!(RiskBucket::for_index(45), RiskBucket::High);
    assert_eq!(RiskBucket::High.to_string(), "high (21-30)");
}

#[test]
fn test_shipped_rules_file_drives_default_tables() {
    let shipped = super::weights::builtin_weights_result().expect("rules file parses");
    assert_eq!(shipped, WeightTables::default());
    assert_eq!(shipped, *DEFAULT_WEIGHTS);

    assert_eq!(shipped.base, 2);
    assert_eq!(shipped.weather.len(), 6);
    assert_eq!(shipped.construction.len(), 13);
    assert_eq!(shipped.process.len(), 13);
    assert_eq!(shipped.construction.get("옹벽 및 절토사면"), Some(&3));
    assert_eq!(shipped.process.get("콘크리트 타설"), Some(&2));
    assert_eq!(shipped.default_process, 1);
}

#[test]
fn test_empty_tables_fall_back_to_defaults() {
    let empty = WeightTables::empty();
    assert_eq!(empty.base, 2);
    assert_eq!(empty.weather_weight("강설"), 0);
    assert_eq!(empty.construction_weight("터널/기타"), 0);
    assert_eq!(empty.process_weight("고소, 접근"), 1);
}

#[test]
fn test_partial_weights_json_uses_defaults() {
    let raw = r#"{ "base": 5, "weather": {}, "construction": {}, "process": {} }"#;
    let weights = WeightTables::from_json(raw).expect("parse");
    assert_eq!(weights.base, 5);
    assert_eq!(weights.default_process, 1);
    assert_eq!(weights.default_weather, 0);
    assert!(WeightTables::from_json("{ not json").is_err());
}

fn task(process: &str, workers: u32, progress_rate: u32) -> TaskProfile {
    TaskProfile {
        process: process.to_string(),
        workers,
        progress_rate,
    }
}

#[test]
fn test_hourly_profile_covers_shift() {
    let profile = hourly_profile(&task("정리", 5, 50), 20, 4);
    assert_eq!(profile.len(), 13);
    assert_eq!(profile.first().map(|h| h.hour), Some(6));
    assert_eq!(profile.last().map(|h| h.hour), Some(18));
    // 06:00 is 5 below base, 15:00 peaks at +8
    assert_eq!(profile[0].score, 15);
    assert_eq!(profile[9].score, 28);
}

#[test]
fn test_hourly_profile_stacks_adjustments_and_clamps() {
    // height work, summer, big crew, early progress at 15:00:
    // 60 + 8 + 10 + 5 + 6 + 5 = 94
    let profile = hourly_profile(&task("고소, 접근", 40, 10), 60, 7);
    let at_three = profile.iter().find(|h| h.hour == 15).expect("15:00");
    assert_eq!(at_three.score, 94);
    assert_eq!(at_three.level(), HourlyRiskLevel::High);

    let capped = hourly_profile(&task("고소, 접근", 40, 10), 99, 7);
    assert!(capped.iter().all(|h| (1..=100).contains(&h.score)));

    let floored = hourly_profile(&task("정리", 10, 50), -20, 4);
    assert!(floored.iter().all(|h| h.score == 1));
}

#[test]
fn test_extreme_base_scores_clamp_without_overflow() {
    let high = hourly_profile(&task("고소, 접근", 40, 10), i32::MAX - 5, 7);
    assert!(high.iter().all(|h| h.score == 100));
    assert_eq!(high[9].level(), HourlyRiskLevel::High);

    let low = hourly_profile(&task("정리", 10, 50), i32::MIN, 1);
    assert!(low.iter().all(|h| h.score == 1));

    let window = recommend_work_window(&task("고소, 접근", 40, 10), i32::MAX, 7);
    assert_eq!((window.start_hour, window.end_hour), (8, 12));
}

#[test]
fn test_winter_edges_of_shift_are_riskier() {
    let winter = hourly_profile(&task("정리", 10, 50), 20, 1);
    let spring = hourly_profile(&task("정리", 10, 50), 20, 4);
    assert_eq!(winter[0].score - spring[0].score, 4);
    assert_eq!(winter[12].score - spring[12].score, 4);
    assert_eq!(winter[5].score, spring[5].score);
}

#[test]
fn test_recommendation_prefers_early_low_hour() {
    let window = recommend_work_window(&task("고소, 접근", 25, 50), 20, 4);
    assert_eq!(window.start_hour, 6);
    assert_eq!(window.end_hour, 8);
    assert!(window.reason.contains("morning"));
    assert!(window.reason.contains("height"));
    assert!(window.reason.contains("crews"));
}

#[test]
fn test_recommendation_falls_back_to_default_window() {
    let window = recommend_work_window(&task("정리", 10, 50), 95, 4);
    assert_eq!(window.start_hour, 8);
    assert_eq!(window.end_hour, 12);
    assert_eq!(window.reason, "general safe working window");
}

#[test]
fn test_hourly_levels() {
    assert_eq!(HourlyRiskLevel::from_score(30), HourlyRiskLevel::Low);
    assert_eq!(HourlyRiskLevel::from_score(31), HourlyRiskLevel::Medium);
    assert_eq!(HourlyRiskLevel::from_score(70), HourlyRiskLevel::Medium);
    assert_eq!(HourlyRiskLevel::from_score(71), HourlyRiskLevel::High);
}
