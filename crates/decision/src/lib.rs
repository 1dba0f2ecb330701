// Scorecard Decision Engine
//
// Security-posture scoring and remediation engine

pub mod analysis;
pub mod engine;
mod recommendations;
mod tasks;

pub use engine::*;
pub use recommendations::{
    BREACH_ESCALATION_COUNT, GENERAL_IMPROVEMENT_THRESHOLD, PASSWORD_HEALTHY_THRESHOLD,
    PASSWORD_WEAK_THRESHOLD,
};

#[cfg(test)]
mod tests {
    use super::*;
    use scorecard_core::{
        CompositeScore, Priority, RecommendationTopic, ScoreLabel, ScorecardError, SignalSet,
        TaskCategory,
    };

    fn signals(password: i32, breaches: i32, two_fa: bool) -> SignalSet {
        SignalSet::new(password, breaches, two_fa)
    }

    fn topics_and_priorities(
        recs: &[scorecard_core::Recommendation],
    ) -> Vec<(RecommendationTopic, Option<Priority>)> {
        recs.iter().map(|r| (r.topic, r.priority)).collect()
    }

    // ===== Scoring Tests =====

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoreWeights::default();
        assert_eq!(weights, ScoreWeights::DEFAULT);
        assert!((weights.sum() - 1.0).abs() < 1e-12);
        assert!(weights.validate().is_ok());
        assert!(WeightedPostureEngine::new().weights().validate().is_ok());
    }

    #[test]
    fn test_custom_weights_must_sum_to_one() {
        let bad = ScoreWeights {
            password: 0.5,
            breach: 0.3,
            two_fa: 0.3,
        };
        assert!(matches!(
            WeightedPostureEngine::with_weights(bad),
            Err(ScorecardError::InvalidInput(_))
        ));

        let negative = ScoreWeights {
            password: 1.2,
            breach: -0.2,
            two_fa: 0.0,
        };
        assert!(WeightedPostureEngine::with_weights(negative).is_err());

        let even = ScoreWeights {
            password: 0.5,
            breach: 0.25,
            two_fa: 0.25,
        };
        let engine = WeightedPostureEngine::with_weights(even).unwrap();
        assert_eq!(engine.weights(), even);
    }

    #[test]
    fn test_all_healthy_scores_100() {
        let score = compute_score(&signals(100, 0, true)).unwrap();
        assert_eq!(score.value, 100);
        assert_eq!(score.label, ScoreLabel::Excellent);
    }

    #[test]
    fn test_worst_case_scores_0() {
        for breaches in [5, 6, 50, i32::MAX] {
            let score = compute_score(&signals(0, breaches, false)).unwrap();
            assert_eq!(score.value, 0, "breaches = {}", breaches);
            assert_eq!(score.label, ScoreLabel::Poor);
        }
    }

    #[test]
    fn test_breach_component_saturates() {
        let at_five = compute_score(&signals(80, 5, true)).unwrap();
        let at_nine = compute_score(&signals(80, 9, true)).unwrap();
        assert_eq!(at_five, at_nine);
        // 0.8*0.4 + 0 + 0.3 = 0.62
        assert_eq!(at_five.value, 62);
    }

    #[test]
    fn test_breach_component_is_linear() {
        // 0.4 + b*0.3 + 0.3 for b in 1.0, 0.8, 0.6, 0.4, 0.2
        let values: Vec<u8> = (0..5)
            .map(|b| compute_score(&signals(100, b, true)).unwrap().value)
            .collect();
        assert_eq!(values, vec![100, 94, 88, 82, 76]);
    }

    #[test]
    fn test_compute_score_is_deterministic() {
        for s in [signals(72, 2, false), signals(33, 1, true), signals(91, 0, false)] {
            let first = compute_score(&s).unwrap();
            let second = compute_score(&s).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_value_always_in_range() {
        for password in (0..=100).step_by(5) {
            for breaches in 0..8 {
                for two_fa in [false, true] {
                    let score = compute_score(&signals(password, breaches, two_fa)).unwrap();
                    assert!(score.value <= 100);
                    assert_eq!(score.label, ScoreLabel::from_value(score.value));
                }
            }
        }
    }

    #[test]
    fn test_label_boundaries_from_scoring() {
        // password only, no 2FA, 5+ breaches: value == round(password * 0.4)
        assert_eq!(compute_score(&signals(100, 5, false)).unwrap().value, 40);
        assert_eq!(compute_score(&signals(100, 5, false)).unwrap().label, ScoreLabel::Fair);
        // 2FA + no breaches = 60, plus password * 0.4
        assert_eq!(compute_score(&signals(0, 0, true)).unwrap().label, ScoreLabel::Good);
        assert_eq!(compute_score(&signals(50, 0, true)).unwrap().value, 80);
        assert_eq!(compute_score(&signals(50, 0, true)).unwrap().label, ScoreLabel::Excellent);
        // 0.3 * 0.8 + 0.3 = 0.54, + 0.4*0.15 = 0.60
        assert_eq!(compute_score(&signals(15, 1, true)).unwrap().value, 60);
        assert_eq!(compute_score(&signals(15, 1, true)).unwrap().label, ScoreLabel::Good);
    }

    #[test]
    fn test_label_thresholds_exact() {
        assert_eq!(CompositeScore::from_value(80).label, ScoreLabel::Excellent);
        assert_eq!(CompositeScore::from_value(79).label, ScoreLabel::Good);
        assert_eq!(CompositeScore::from_value(60).label, ScoreLabel::Good);
        assert_eq!(CompositeScore::from_value(59).label, ScoreLabel::Fair);
        assert_eq!(CompositeScore::from_value(40).label, ScoreLabel::Fair);
        assert_eq!(CompositeScore::from_value(39).label, ScoreLabel::Poor);
    }

    #[test]
    fn test_invalid_input_rejected() {
        for bad in [signals(-1, 0, true), signals(101, 0, true), signals(50, -1, true)] {
            match compute_score(&bad) {
                Err(ScorecardError::InvalidInput(msg)) => assert!(!msg.is_empty()),
                other => panic!("Expected InvalidInput for {:?}, got {:?}", bad, other),
            }
        }
    }

    // ===== Recommendation Tests =====

    #[test]
    fn test_healthy_signals_yield_single_informational() {
        let s = signals(100, 0, true);
        let score = compute_score(&s).unwrap();
        let recs = derive_recommendations(&score, &s);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].topic, RecommendationTopic::None);
        assert!(recs[0].priority.is_none());
        assert!(recs[0].is_informational());
    }

    #[test]
    fn test_poor_signals_recommendation_order() {
        let s = signals(50, 3, false);
        let score = compute_score(&s).unwrap();
        assert_eq!(score.value, 32);
        let recs = derive_recommendations(&score, &s);

        assert_eq!(
            topics_and_priorities(&recs),
            vec![
                (RecommendationTopic::Password, Some(Priority::High)),
                (RecommendationTopic::Breach, Some(Priority::High)),
                (RecommendationTopic::TwoFa, Some(Priority::High)),
                (RecommendationTopic::General, Some(Priority::Medium)),
            ]
        );
        assert!(recs[1].description.starts_with("3 potential breach(es)"));
    }

    #[test]
    fn test_general_recommendation_needs_low_score() {
        // 2FA disabled but score stays >= 60: 0.9*0.4 + 1.0*0.3 = 0.66
        let s = signals(90, 0, false);
        let score = compute_score(&s).unwrap();
        assert_eq!(score.value, 66);
        let recs = derive_recommendations(&score, &s);

        assert_eq!(
            topics_and_priorities(&recs),
            vec![(RecommendationTopic::TwoFa, Some(Priority::High))]
        );
    }

    #[test]
    fn test_password_recommendation_boundaries() {
        let rec_for = |password: i32| {
            let s = signals(password, 0, true);
            let score = compute_score(&s).unwrap();
            derive_recommendations(&score, &s)
                .into_iter()
                .find(|r| r.topic == RecommendationTopic::Password)
        };

        assert!(rec_for(80).is_none());
        assert_eq!(rec_for(79).unwrap().priority, Some(Priority::Medium));
        assert_eq!(rec_for(60).unwrap().priority, Some(Priority::Medium));
        assert_eq!(rec_for(59).unwrap().priority, Some(Priority::High));
    }

    #[test]
    fn test_breach_recommendation_boundaries() {
        let priority_for = |breaches: i32| {
            let s = signals(100, breaches, true);
            let score = compute_score(&s).unwrap();
            derive_recommendations(&score, &s)
                .into_iter()
                .find(|r| r.topic == RecommendationTopic::Breach)
                .and_then(|r| r.priority)
        };

        assert_eq!(priority_for(0), None);
        assert_eq!(priority_for(1), Some(Priority::Medium));
        assert_eq!(priority_for(2), Some(Priority::Medium));
        assert_eq!(priority_for(3), Some(Priority::High));
    }

    #[test]
    fn test_recommendations_are_idempotent() {
        let s = signals(65, 4, false);
        let score = compute_score(&s).unwrap();
        assert_eq!(
            derive_recommendations(&score, &s),
            derive_recommendations(&score, &s)
        );
    }

    // ===== Task Tests =====

    #[test]
    fn test_baseline_tasks_always_present() {
        let tasks = derive_tasks(&signals(100, 0, true));

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Set up password manager");
        assert_eq!(tasks[0].priority, Priority::Medium);
        assert_eq!(tasks[0].category, TaskCategory::Password);
        assert_eq!(tasks[1].title, "Review account recovery options");
        assert_eq!(tasks[1].priority, Priority::Medium);
        assert_eq!(tasks[1].category, TaskCategory::General);
    }

    #[test]
    fn test_weak_password_only_tasks() {
        let tasks = derive_tasks(&signals(55, 0, true));

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].category, TaskCategory::Password);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].title, "Change weak passwords");
        assert!(tasks.iter().all(|t| t.category != TaskCategory::TwoFa));
        assert!(tasks.iter().all(|t| t.category != TaskCategory::Breach));
    }

    #[test]
    fn test_task_ids_unique_within_batch() {
        let tasks = derive_tasks(&signals(10, 4, false));
        let ids: Vec<u32> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn test_breach_task_priority() {
        let high = derive_tasks(&signals(100, 3, true));
        assert_eq!(high[0].category, TaskCategory::Breach);
        assert_eq!(high[0].priority, Priority::High);

        let medium = derive_tasks(&signals(100, 2, true));
        assert_eq!(medium[0].category, TaskCategory::Breach);
        assert_eq!(medium[0].priority, Priority::Medium);
    }

    // ===== End-to-end =====

    #[test]
    fn test_end_to_end_scenario() {
        let engine = WeightedPostureEngine::new();
        let assessment = engine.evaluate(&signals(72, 2, false)).unwrap();

        assert_eq!(assessment.score.value, 47);
        assert_eq!(assessment.score.label, ScoreLabel::Fair);

        assert_eq!(
            topics_and_priorities(&assessment.recommendations),
            vec![
                (RecommendationTopic::Password, Some(Priority::Medium)),
                (RecommendationTopic::Breach, Some(Priority::Medium)),
                (RecommendationTopic::TwoFa, Some(Priority::High)),
                (RecommendationTopic::General, Some(Priority::Medium)),
            ]
        );

        let tasks: Vec<(TaskCategory, Priority)> = assessment
            .tasks
            .iter()
            .map(|t| (t.category, t.priority))
            .collect();
        assert_eq!(
            tasks,
            vec![
                (TaskCategory::Password, Priority::Medium),
                (TaskCategory::TwoFa, Priority::High),
                (TaskCategory::Breach, Priority::Medium),
                (TaskCategory::Password, Priority::Medium),
                (TaskCategory::General, Priority::Medium),
            ]
        );
    }

    #[test]
    fn test_evaluate_propagates_invalid_input() {
        let engine = WeightedPostureEngine::default();
        assert!(matches!(
            engine.evaluate(&signals(101, 0, true)),
            Err(ScorecardError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_evaluate_batch() {
        let engine = WeightedPostureEngine::new();
        let results = engine.evaluate_batch(&[signals(100, 0, true), signals(50, -2, true)]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().score.value, 100);
        assert!(results[1].is_err());
    }

    #[test]
    fn test_assessment_serializes() {
        let assessment = WeightedPostureEngine::new()
            .evaluate(&signals(72, 2, false))
            .unwrap();
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["score"]["value"], 47);
        assert_eq!(json["score"]["label"], "Fair");
        assert_eq!(json["recommendations"][2]["topic"], "twoFa");
        assert_eq!(json["tasks"][1]["category"], "twoFa");
    }

    // ===== Analysis Tests =====

    #[test]
    fn test_password_analysis_bands() {
        use analysis::{IssueSeverity, PasswordStrength, analyze_password};

        let strong = analyze_password(85).unwrap();
        assert_eq!(strong.strength, PasswordStrength::Strong);
        assert!(strong.issues.is_empty());

        let fair = analyze_password(70).unwrap();
        assert_eq!(fair.strength, PasswordStrength::Fair);
        assert_eq!(fair.issues.len(), 1);
        assert_eq!(fair.issues[0].severity, IssueSeverity::Warning);

        let weak = analyze_password(35).unwrap();
        assert_eq!(weak.strength, PasswordStrength::Weak);
        let titles: Vec<&str> = weak.issues.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Password Strength", "Password Reuse", "Common Passwords"]
        );

        assert!(analyze_password(101).is_err());
    }

    #[test]
    fn test_password_distribution() {
        let analysis = analysis::analyze_password(72).unwrap();
        // 72*0.8 = 57.6, 28*0.6 = 16.8, 28*0.4 = 11.2
        assert_eq!(analysis.distribution.strong, 58);
        assert_eq!(analysis.distribution.needs_improvement, 17);
        assert_eq!(analysis.distribution.at_risk, 11);
    }

    #[test]
    fn test_breach_advisories() {
        use scorecard_core::AdvisoryKind;

        let none = analysis::breach_advisories(0);
        assert_eq!(none.len(), 1);
        assert_eq!(none[0].kind, AdvisoryKind::Good);

        let some = analysis::breach_advisories(2);
        let kinds: Vec<AdvisoryKind> = some.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AdvisoryKind::Urgent,
                AdvisoryKind::Security,
                AdvisoryKind::Monitoring
            ]
        );
    }

    #[test]
    fn test_two_fa_coverage() {
        use analysis::{TwoFaStatus, assess_two_fa};

        let enabled = assess_two_fa(true, 4);
        assert_eq!(enabled.status, TwoFaStatus::Partial);
        assert_eq!(enabled.total_services, 8);
        assert_eq!(enabled.coverage_percent, 50);
        assert!(enabled.services_to_secure.is_empty());

        let disabled = assess_two_fa(false, 1);
        assert_eq!(disabled.status, TwoFaStatus::NeedsSetup);
        assert_eq!(disabled.coverage_percent, 13);
        let names: Vec<&str> = disabled
            .services_to_secure
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Google",
                "Microsoft",
                "Apple",
                "GitHub",
                "Facebook",
                "Twitter/X",
                "Instagram",
                "LinkedIn"
            ]
        );

        assert_eq!(assess_two_fa(true, 99).enabled_services, 8);
    }
}
