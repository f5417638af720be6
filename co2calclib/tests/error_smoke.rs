use co2calclib::{
    calculate_annual_emissions, calculate_monthly_emission,
    model::{BatchCalculationRequest, MonthlyActivity},
    Co2Error, ErrorKind, ErrorResponse, FactorCatalog,
};

fn powered(month: &str, supplier: Option<&str>, menu: Option<&str>) -> MonthlyActivity {
    MonthlyActivity {
        usage_kwh: 100.0,
        power_supplier_id: supplier.map(Into::into),
        power_menu_type: menu.map(Into::into),
        ..MonthlyActivity::new(month)
    }
}

#[test]
fn missing_supplier_fails_the_whole_batch() {
    let catalog = FactorCatalog::builtin().expect("builtin catalog");
    let req = BatchCalculationRequest {
        target_fiscal_year: 2025,
        monthly_activities: vec![
            powered("2025-04", Some("hokkaido_electric"), Some("standard_plan")),
            powered("2025-05", None, Some("standard_plan")),
            powered("2025-06", Some("nobody"), Some("nothing")),
        ],
    };

    let err = calculate_annual_emissions(&req, &catalog).unwrap_err();
    match &err {
        Co2Error::Validation { month, usage_kwh } => {
            assert_eq!(month, "2025-05");
            assert_eq!(*usage_kwh, 100.0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Client);
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.month(), Some("2025-05"));
    assert!(err.to_string().contains("supplier id or menu id is missing"));
}

#[test]
fn missing_or_empty_menu_is_a_validation_error() {
    let catalog = FactorCatalog::builtin().expect("builtin catalog");
    for a in [
        powered("2025-04", Some("hokkaido_electric"), None),
        powered("2025-04", Some("hokkaido_electric"), Some("")),
        powered("2025-04", Some(""), Some("standard_plan")),
    ] {
        let err = calculate_monthly_emission(&a, &catalog).unwrap_err();
        assert!(matches!(err, Co2Error::Validation { .. }), "{err:?}");
    }
}

#[test]
fn unknown_plan_is_a_lookup_error() {
    let catalog = FactorCatalog::builtin().expect("builtin catalog");
    let a = powered("2025-08", Some("hokkaido_electric"), Some("Standard_Plan"));

    let err = calculate_monthly_emission(&a, &catalog).unwrap_err();
    match &err {
        Co2Error::Lookup { month, supplier_id, menu_id } => {
            assert_eq!(month, "2025-08");
            assert_eq!(supplier_id, "hokkaido_electric");
            assert_eq!(menu_id, "Standard_Plan");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Client);

    let resp = ErrorResponse::from(&err);
    assert!(resp.detail.contains("Standard_Plan"));
    assert!(resp.detail.contains("2025-08"));
}

#[test]
fn supplier_is_ignored_without_electricity() {
    let catalog = FactorCatalog::builtin().expect("builtin catalog");
    let a = MonthlyActivity {
        power_supplier_id: Some("nobody".into()),
        kerosene_l: 2.0,
        ..MonthlyActivity::new("2025-09")
    };
    let m = calculate_monthly_emission(&a, &catalog).expect("month");
    assert_eq!(m.details.len(), 1);
    assert_eq!(m.total_co2_kg, 5.02);
}

#[test]
fn empty_batch_is_rejected() {
    let catalog = FactorCatalog::builtin().expect("builtin catalog");
    let req = BatchCalculationRequest {
        target_fiscal_year: 2025,
        monthly_activities: Vec::new(),
    };
    let err = calculate_annual_emissions(&req, &catalog).unwrap_err();
    assert!(matches!(err, Co2Error::InvalidRequest(_)));
}

#[test]
fn catalog_defects_are_internal() {
    let err = Co2Error::Catalog("missing fuel factor: lp_gas".into());
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.status_code(), 500);
    assert_eq!(ErrorResponse::from(&err).detail, "internal error");
}
