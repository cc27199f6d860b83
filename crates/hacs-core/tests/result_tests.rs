// Host-side tests for classification results and reset tokens.

use hacs_core::*;

#[test]
fn probability_must_be_a_ratio() {
    assert!(ClassificationResult::new(true, 0.0).is_ok());
    assert!(ClassificationResult::new(false, 1.0).is_ok());
    assert_eq!(
        ClassificationResult::new(true, 1.2),
        Err(ResultError::ProbabilityOutOfRange(1.2))
    );
    assert!(ClassificationResult::new(true, -0.1).is_err());
    assert!(ClassificationResult::new(true, f32::NAN).is_err());
}

#[test]
fn outcome_follows_the_hazard_flag() {
    let r = ClassificationResult::new(true, 0.9).unwrap();
    assert!(r.hazardous());
    assert_eq!(r.outcome(), Outcome::Hazardous);
    assert!(r.outcome().is_hazardous());
    let r = ClassificationResult::new(false, 0.9).unwrap();
    assert_eq!(r.outcome(), Outcome::Safe);
}

#[test]
fn api_response_converts_into_a_result() {
    let resp: PredictionResponse =
        serde_json::from_str(r#"{"prediction":"Hazardous","confidence":0.92}"#).unwrap();
    let r = ClassificationResult::try_from(resp).unwrap();
    assert!(r.hazardous());
    assert!((r.probability() - 0.92).abs() < 1e-6);

    let resp: PredictionResponse =
        serde_json::from_str(r#"{"prediction":"Non-Hazardous","confidence":0.4}"#).unwrap();
    assert!(!ClassificationResult::try_from(resp).unwrap().hazardous());
}

#[test]
fn unknown_labels_and_bad_confidence_are_rejected() {
    let resp = PredictionResponse {
        prediction: "Maybe".into(),
        confidence: 0.5,
    };
    assert_eq!(
        ClassificationResult::try_from(resp),
        Err(ResultError::UnknownLabel("Maybe".into()))
    );
    let resp = PredictionResponse {
        prediction: LABEL_HAZARDOUS.into(),
        confidence: 3.0,
    };
    assert!(ClassificationResult::try_from(resp).is_err());
}

#[test]
fn feed_issues_a_fresh_token_per_result() {
    let mut feed = ResultFeed::new();
    assert!(feed.latest().is_none());
    let same = ClassificationResult::new(true, 0.8).unwrap();
    let a = feed.accept(same);
    let b = feed.accept(same);
    assert_ne!(a, b);
    assert!(b > a);
    assert_eq!(feed.current_token(), b);
    assert_eq!(feed.latest(), Some(&same));
}
