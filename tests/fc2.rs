#[macro_use]
extern crate fcfit_assert_close;

use fcfit::{
    fit_fc2, CoordsKind, FracRot, Lattice, SingleDisplacement, SiteSymmetries, Supercell,
};
use fcfit::{M33, V3};
use fcfit_array_types::mat;

fn init_logging() {
    let _ = env_logger::try_init();
}

fn c4z_group() -> Vec<FracRot> {
    vec![
        FracRot::eye(),
        FracRot::from(&[[ 0, -1, 0], [ 1,  0, 0], [0, 0, 1]]),
        FracRot::from(&[[-1,  0, 0], [ 0, -1, 0], [0, 0, 1]]),
        FracRot::from(&[[ 0,  1, 0], [-1,  0, 0], [0, 0, 1]]),
    ]
}

/// Forces on every atom of a harmonic model when `atom` is displaced by `u`.
///
/// `phi_row[j]` is the force-constant block from the displaced atom to
/// atom j; the force on j is `-phi_row[j]^T u`.
fn harmonic_forces(phi_row: &[M33], u: &V3) -> Vec<V3> {
    phi_row.iter().map(|block| -(&block.t() * u)).collect()
}

// A single displacement plus a 4-fold axis is enough to pin down both
// in-plane rows; the axis supplies the orthogonal direction, and the
// never-measured z direction comes out zero by minimum-norm.
#[test]
fn site_symmetry_substitutes_for_measurements() {
    init_logging();

    let cell = Supercell::new(
        Lattice::cubic(4.0),
        CoordsKind::Fracs(vec![
            V3([0.0, 0.0, 0.0]),
            // sent to itself (mod lattice) by every C4z operation
            V3([0.5, 0.5, 0.0]),
        ]),
    );
    let symm = SiteSymmetries::new(vec![c4z_group(), c4z_group()], 1e-5).unwrap();

    let phi_00 = mat::from_array([
        [ 50.0, 0.0, 0.0],
        [  0.0, 50.0, 0.0],
        [  0.0, 0.0, 0.0],
    ]);
    let phi_01 = mat::from_array([
        [-50.0, 0.0, 0.0],
        [  0.0, -50.0, 0.0],
        [  0.0, 0.0, 0.0],
    ]);

    let u = V3([0.01, 0.0, 0.0]);
    let dataset = vec![SingleDisplacement {
        atom: 0,
        displacement: u,
        forces: harmonic_forces(&[phi_00, phi_01], &u),
    }];

    let fc2 = fit_fc2(&cell, &dataset, &symm).unwrap();

    assert_close!(abs=1e-9, fc2[(0, 0)], phi_00);
    assert_close!(abs=1e-9, fc2[(0, 1)], phi_01);

    // the fitted blocks carry the site symmetry: R Phi R^T = Phi for
    // every operation fixing both atoms
    for rot in c4z_group() {
        let r = rot.cart(cell.lattice());
        let rotated = &(&r * &fc2[(0, 0)]) * &r.t();
        assert_close!(abs=1e-9, rotated, fc2[(0, 0)]);
    }
}

#[test]
fn round_trip_recovers_known_force_constants() {
    init_logging();

    let cell = Supercell::new(
        Lattice::orthorhombic(4.0, 5.0, 6.0),
        CoordsKind::Fracs(vec![
            V3([0.0, 0.0, 0.0]),
            V3([0.5, 0.5, 0.5]),
        ]),
    );
    let symm = SiteSymmetries::identity(2, 1e-5);

    let coupling = mat::from_array([
        [10.0, 2.0, 0.0],
        [ 2.0, 8.0, 1.0],
        [ 0.0, 1.0, 6.0],
    ]);
    // acoustic sum rule holds by construction
    let phi = [
        [coupling, -coupling],
        [-coupling, coupling],
    ];

    let h = 0.01;
    let mut dataset = vec![];
    for atom in 0..2 {
        for axis in 0..3 {
            for sign in &[1.0, -1.0] {
                let u = V3::from_fn(|k| if k == axis { sign * h } else { 0.0 });
                dataset.push(SingleDisplacement {
                    atom,
                    displacement: u,
                    forces: harmonic_forces(&phi[atom], &u),
                });
            }
        }
    }

    let fc2 = fit_fc2(&cell, &dataset, &symm).unwrap();

    for i in 0..2 {
        for j in 0..2 {
            assert_close!(abs=1e-9, rel=1e-9, fc2[(i, j)], phi[i][j]);
        }
    }

    // newton's third law, as a sum rule over each row
    for i in 0..2 {
        let sum = fc2[(i, 0)] + fc2[(i, 1)];
        assert_close!(abs=1e-9, sum, M33::zero());
    }
}

#[test]
fn inconsistent_site_symmetry_aborts_the_run() {
    init_logging();

    // claiming a 4-fold axis for a cell that doesn't have one must fail
    // the position-matching search, not silently fit garbage
    let cell = Supercell::new(
        Lattice::cubic(4.0),
        CoordsKind::Fracs(vec![
            V3([0.0, 0.0, 0.0]),
            V3([0.25, 0.0, 0.0]),
        ]),
    );
    let symm = SiteSymmetries::new(vec![c4z_group(), c4z_group()], 1e-5).unwrap();

    let dataset = vec![SingleDisplacement {
        atom: 0,
        displacement: V3([0.0, 0.0, 0.01]),
        forces: vec![V3::zero(); 2],
    }];

    let err = fit_fc2(&cell, &dataset, &symm).unwrap_err();
    assert!(err.downcast_ref::<fcfit::PositionMatchError>().is_some());
}
