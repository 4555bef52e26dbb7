//! Tests for the interactive prediction form state

use crossterm::event::KeyCode;
use hamper_forecast::cli::predict_form::{FormAction, FormField, PredictionForm};
use hamper_forecast::pipeline::{build_feature_vector, Prediction, Selections};

#[test]
fn test_form_starts_on_defaults() {
    let form = PredictionForm::new();

    assert_eq!(form.focused(), FormField::SpecialEvent);
    assert_eq!(form.selections(), Selections::default());
    assert!(form.outcome().is_none());
}

#[test]
fn test_focus_wraps_both_ways() {
    let mut form = PredictionForm::new();

    form.focus_prev();
    assert_eq!(form.focused(), FormField::Year);

    form.focus_next();
    assert_eq!(form.focused(), FormField::SpecialEvent);

    for _ in 0..FormField::ALL.len() {
        form.focus_next();
    }
    assert_eq!(form.focused(), FormField::SpecialEvent);
}

#[test]
fn test_category_fields_cycle_through_labels() {
    let mut form = PredictionForm::new();

    form.increment();
    assert_eq!(form.selections().special_event, "Family Day");

    form.decrement();
    form.decrement();
    assert_eq!(
        form.selections().special_event,
        "Christmas Day",
        "Stepping back from the first label wraps to the last"
    );
}

#[test]
fn test_numeric_fields_clamp_at_bounds() {
    let mut form = PredictionForm::new();
    while form.focused() != FormField::FamilySize {
        form.focus_next();
    }

    for _ in 0..20 {
        form.increment();
    }
    assert_eq!(form.selections().family_size, 13);

    for _ in 0..20 {
        form.decrement();
    }
    assert_eq!(form.selections().family_size, 1);

    form.focus_prev();
    form.focus_prev();
    form.focus_prev();
    form.focus_prev();
    assert_eq!(form.focused(), FormField::Year);
    for _ in 0..5 {
        form.increment();
    }
    assert_eq!(form.selections().year, 2025);
    for _ in 0..5 {
        form.decrement();
    }
    assert_eq!(form.selections().year, 2023);
}

#[test]
fn test_every_reachable_selection_encodes() {
    let mut form = PredictionForm::new();

    for field in FormField::ALL {
        while form.focused() != field {
            form.focus_next();
        }
        for _ in 0..40 {
            form.increment();
            assert!(build_feature_vector(&form.selections()).is_ok());
        }
    }
}

#[test]
fn test_keys_drive_the_form() {
    let mut form = PredictionForm::new();

    assert_eq!(form.handle_key(KeyCode::Down), FormAction::Stay);
    assert_eq!(form.focused(), FormField::DayOfWeek);

    form.handle_key(KeyCode::Right);
    form.handle_key(KeyCode::Right);
    form.handle_key(KeyCode::Right);
    form.handle_key(KeyCode::Right);
    assert_eq!(form.selections().day_of_week, "Friday");

    form.handle_key(KeyCode::Up);
    form.handle_key(KeyCode::Right);
    form.handle_key(KeyCode::Right);
    assert_eq!(form.selections().special_event, "Ramadan");

    match form.handle_key(KeyCode::Enter) {
        FormAction::Submit(selections) => {
            assert_eq!(selections.special_event, "Ramadan");
            assert_eq!(selections.day_of_week, "Friday");
        }
        other => panic!("Expected Submit, got {:?}", other),
    }

    assert_eq!(form.handle_key(KeyCode::Esc), FormAction::Quit);
    assert_eq!(form.handle_key(KeyCode::Char('q')), FormAction::Quit);
}

#[test]
fn test_changing_an_input_clears_the_outcome() {
    let mut form = PredictionForm::new();
    form.set_outcome(Ok(Prediction {
        raw: 42.7,
        hampers: 42,
    }));
    assert!(matches!(form.outcome(), Some(Ok(p)) if p.hampers == 42));

    form.increment();
    assert!(form.outcome().is_none());

    form.set_outcome(Err("model missing".to_string()));
    form.handle_key(KeyCode::Down);
    assert!(
        form.outcome().is_some(),
        "Moving focus does not change the inputs"
    );
}

#[test]
fn test_value_text_shows_bounds_for_numbers() {
    let form = PredictionForm::new();

    assert_eq!(form.value_text(FormField::SpecialEvent), "New Year's Day");
    assert!(form.value_text(FormField::Month).contains("(1-12)"));
    assert!(form.value_text(FormField::Year).contains("2024"));
}
