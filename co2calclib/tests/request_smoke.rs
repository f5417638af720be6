use co2calclib::{
    fiscal::{fiscal_year_months, fiscal_year_of, template_request},
    model::{BatchCalculationRequest, MonthlyActivity},
    validate::{validate_activity, validate_request},
    Co2Error,
};

fn request(months: Vec<MonthlyActivity>) -> BatchCalculationRequest {
    BatchCalculationRequest {
        target_fiscal_year: 2025,
        monthly_activities: months,
    }
}

#[test]
fn fiscal_year_runs_april_to_march() {
    let months = fiscal_year_months(2025);
    assert_eq!(months.len(), 12);
    assert_eq!(months[0], "2025-04");
    assert_eq!(months[8], "2025-12");
    assert_eq!(months[9], "2026-01");
    assert_eq!(months[11], "2026-03");

    assert_eq!(fiscal_year_of("2025-04").expect("april"), 2025);
    assert_eq!(fiscal_year_of("2026-03").expect("march"), 2025);
    assert!(fiscal_year_of("2025-13").is_err());
}

#[test]
fn template_is_a_valid_zero_request() {
    let req = template_request(2030, "national_average", "basic_plan");
    assert_eq!(req.target_fiscal_year, 2030);
    assert_eq!(req.monthly_activities.len(), 12);
    assert!(req.monthly_activities.iter().all(|a| a.usage_kwh == 0.0
        && a.power_supplier_id.as_deref() == Some("national_average")
        && a.power_menu_type.as_deref() == Some("basic_plan")));
    validate_request(&req).expect("template validates");
}

#[test]
fn request_shape_rules() {
    assert!(validate_request(&request(vec![MonthlyActivity::new("2025-04")])).is_ok());

    let mut old = request(vec![MonthlyActivity::new("2019-04")]);
    old.target_fiscal_year = 2019;
    assert!(matches!(validate_request(&old), Err(Co2Error::InvalidRequest(_))));

    assert!(matches!(validate_request(&request(Vec::new())), Err(Co2Error::InvalidRequest(_))));

    for token in ["2025-4", "202504", "2025-04-01", "April", "2025-00", "2025-13"] {
        let err = validate_activity(&MonthlyActivity::new(token)).unwrap_err();
        assert!(matches!(err, Co2Error::InvalidRequest(_)), "{token}: {err:?}");
    }
}

#[test]
fn quantities_must_be_non_negative() {
    let negative = MonthlyActivity {
        lp_gas_kg: -1.0,
        ..MonthlyActivity::new("2025-04")
    };
    let err = validate_request(&request(vec![MonthlyActivity::new("2025-04"), negative])).unwrap_err();
    match err {
        Co2Error::InvalidRequest(msg) => {
            assert!(msg.starts_with("monthly_activities[1]"), "{msg}");
            assert!(msg.contains("lp_gas_kg"), "{msg}");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let nan = MonthlyActivity {
        usage_kwh: f64::NAN,
        ..MonthlyActivity::new("2025-04")
    };
    assert!(validate_activity(&nan).is_err());
}
