//! Tests for qubit model construction and Hamiltonian queries.

use arvak_qubit::operator::{identity, is_hermitian, scaled_identity as scaled};
use arvak_qubit::{
    ChargeTransmon, FamilyRegistry, FullFluxonium, HamiltonianBuilder, HamiltonianTerm, Matrix,
    OperatorKind, QubitError, QubitModel, QubitSpec, QubitVariant,
};

fn assert_close(a: &Matrix, b: &Matrix, tol: f64) {
    assert_eq!(a.dim(), b.dim());
    for ((i, j), v) in a.indexed_iter() {
        assert!((v - b[[i, j]]).norm() < tol, "({i}, {j}): {v} vs {}", b[[i, j]]);
    }
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn flux_qubit_scenario() {
    let spec = QubitSpec::new(QubitVariant::Flux, 1.0, 0.5).with_phi_ext(0.3);
    let model = QubitModel::new(spec).unwrap();

    let zpf = model.zero_point();
    assert!((zpf.phi - 0.707_106_781_186_547_6).abs() < 1e-12);
    assert!((zpf.n - 1.414_213_562_373_095).abs() < 1e-12);

    let h = model.nonlinear_hamiltonian();
    assert_close(&h, &scaled(2, -(0.3f64).cos()), 1e-12);
    assert!((h[[0, 0]].re - (-0.9553)).abs() < 1e-4);
}

#[test]
fn transmon_scenario() {
    let model = QubitModel::new(QubitSpec::new(QubitVariant::Transmon, 2.0, 1.0)).unwrap();

    assert_close(&model.linear_hamiltonian(), &identity(2), 1e-15);

    let h = model.nonlinear_hamiltonian();
    assert_close(&h, &scaled(2, -(1.0f64).cos()), 1e-15);
    assert!((h[[1, 1]].re - (-0.5403)).abs() < 1e-4);
}

#[test]
fn fluxonium_placeholder_terms() {
    let spec = QubitSpec::new(QubitVariant::Fluxonium, 0.8, 1.5).with_truncation(4);
    let model = QubitModel::new(spec).unwrap();
    assert_close(&model.linear_hamiltonian(), &scaled(4, 0.8), 1e-15);
    assert_close(&model.nonlinear_hamiltonian(), &scaled(4, -0.8 * 2.0f64.cos()), 1e-15);
}

// ---------------------------------------------------------------------------
// Invariants
// ---------------------------------------------------------------------------

#[test]
fn every_builtin_family_yields_hermitian_terms_of_the_right_size() {
    for variant in [QubitVariant::Flux, QubitVariant::Transmon, QubitVariant::Fluxonium] {
        for dim in [2, 3, 7] {
            let spec = QubitSpec::new(variant.clone(), 1.3, 0.4)
                .with_phi_ext(0.7)
                .with_truncation(dim);
            let model = QubitModel::new(spec).unwrap();
            for term in [HamiltonianTerm::Linear, HamiltonianTerm::Nonlinear, HamiltonianTerm::Full] {
                let h = model.hamiltonian(term);
                assert_eq!(h.dim(), (dim, dim), "{variant} {term}");
                assert!(is_hermitian(&h, 1e-12), "{variant} {term}");
            }
        }
    }
}

#[test]
fn repeated_queries_are_bit_identical() {
    let spec = QubitSpec::new(QubitVariant::Flux, 1.0, 0.5)
        .with_phi_ext(0.3)
        .with_truncation(5);
    let model = QubitModel::new(spec).unwrap();

    let first = (model.linear_hamiltonian(), model.nonlinear_hamiltonian());
    for _ in 0..10 {
        assert_eq!(model.linear_hamiltonian(), first.0);
        assert_eq!(model.nonlinear_hamiltonian(), first.1);
    }
}

#[test]
fn model_matches_stateless_builder() {
    let spec = QubitSpec::new(QubitVariant::Transmon, 3.0, 0.25).with_truncation(3);
    let model = QubitModel::new(spec.clone()).unwrap();
    let builder = HamiltonianBuilder::default();
    assert_eq!(builder.linear_hamiltonian(&spec).unwrap(), model.linear_hamiltonian());
    assert_eq!(builder.nonlinear_hamiltonian(&spec).unwrap(), model.nonlinear_hamiltonian());
}

// ---------------------------------------------------------------------------
// Construction failures
// ---------------------------------------------------------------------------

#[test]
fn non_positive_energies_are_rejected() {
    for (el, ec) in [(0.0, 1.0), (-1.0, 1.0), (1.0, 0.0), (1.0, -0.5)] {
        for variant in [QubitVariant::Flux, QubitVariant::Transmon, QubitVariant::Fluxonium] {
            let result = QubitModel::new(QubitSpec::new(variant, el, ec));
            assert!(
                matches!(result, Err(QubitError::InvalidParameter { .. })),
                "el={el} ec={ec}"
            );
        }
    }
}

#[test]
fn overflowing_energy_ratio_is_rejected() {
    for variant in [QubitVariant::Flux, QubitVariant::Transmon, QubitVariant::Fluxonium] {
        for (el, ec) in [(1e-200, 1e200), (1e200, 1e-200)] {
            let result = QubitModel::new(QubitSpec::new(variant.clone(), el, ec));
            assert!(
                matches!(result, Err(QubitError::InvalidParameter { name: "ec/el", .. })),
                "{variant} el={el} ec={ec}"
            );
        }
    }
}

#[test]
fn truncation_below_two_is_rejected() {
    let spec = QubitSpec::new(QubitVariant::Flux, 1.0, 1.0).with_truncation(1);
    assert!(matches!(
        QubitModel::new(spec),
        Err(QubitError::InvalidParameter { name: "truncation_dim", .. })
    ));
}

#[test]
fn variant_tags_are_case_insensitive() {
    let spec: QubitSpec =
        serde_json::from_str(r#"{"variant": "Transmon", "el": 2.0, "ec": 1.0}"#).unwrap();
    let model = QubitModel::new(spec).unwrap();
    assert_eq!(model.variant(), &QubitVariant::Transmon);
}

#[test]
fn unknown_variant_is_rejected() {
    assert!(matches!(
        QubitModel::from_tag("quaternion", 1.0, 1.0),
        Err(QubitError::UnsupportedQubitType(tag)) if tag == "quaternion"
    ));

    let spec = QubitSpec::new(QubitVariant::custom("quaternion"), 1.0, 1.0);
    assert!(matches!(
        QubitModel::new(spec),
        Err(QubitError::UnsupportedQubitType(_))
    ));
}

// ---------------------------------------------------------------------------
// Operator-valued fluxonium
// ---------------------------------------------------------------------------

#[test]
fn full_fluxonium_needs_registration_and_ej() {
    let spec = QubitSpec::new(QubitVariant::custom(FullFluxonium::TAG), 0.5, 1.0)
        .with_phi_ext(0.5)
        .with_truncation(10);

    assert!(matches!(
        QubitModel::new(spec.clone()),
        Err(QubitError::UnsupportedQubitType(_))
    ));

    let registry = FamilyRegistry::with_physical();
    assert!(matches!(
        QubitModel::with_registry(spec.clone(), &registry),
        Err(QubitError::InvalidParameter { name: "ej", .. })
    ));

    let model = QubitModel::with_registry(spec.with_ej(8.0), &registry).unwrap();
    let h = model.full_hamiltonian();
    assert_eq!(h.dim(), (10, 10));
    assert!(is_hermitian(&h, 1e-10));
    assert!((model.zero_point().product() - 0.5).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Charge-basis transmon
// ---------------------------------------------------------------------------

#[test]
fn charge_transmon_model() {
    let spec = QubitSpec::new(QubitVariant::custom(ChargeTransmon::TAG), 1.0, 0.25)
        .with_ej(10.0)
        .with_ng(0.3)
        .with_charge_cutoff(5);

    assert!(matches!(
        QubitModel::new(spec.clone()),
        Err(QubitError::UnsupportedQubitType(_))
    ));

    let model = QubitModel::with_registry(spec, &FamilyRegistry::with_physical()).unwrap();
    assert_eq!(model.dim(), 11);

    let h = model.full_hamiltonian();
    assert_eq!(h.dim(), (11, 11));
    assert!(is_hermitian(&h, 0.0));
    // Diagonal is the charging energy, shifted by the offset charge.
    assert!((h[[5, 5]].re - 0.25 * 0.6f64.powi(2)).abs() < 1e-15);
    // Josephson tunnelling moves one Cooper pair (two electrons).
    assert_eq!(h[[0, 2]].re, -5.0);
    assert_eq!(h[[0, 1]].norm(), 0.0);

    let n = model.operator(OperatorKind::Charge);
    assert_eq!(n[[0, 0]].re, -5.0);
    assert_eq!(n[[10, 10]].re, 5.0);
}
