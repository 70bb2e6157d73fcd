//! Second-order force-constant fitting.
//!
//! The measured displacements at each atom are expanded over that atom's
//! site symmetry: every operation contributes a rotated copy of each
//! displacement, paired with the (rotated) force that the crystal's
//! invariance says must accompany it.  The force-constant block toward
//! each target atom is then the least-squares solution of `F = -U Phi`.

use crate::dataset::SingleDisplacement;
use crate::symmetry::{cart_rotations, SiteSymmetries};
use crate::tensor::Fc2;
use crate::FailResult;
use fcfit_array_types::M33;
use fcfit_linalg::{left_pseudoinverse, DMatrix};
use fcfit_structure::{atoms_sent_by_rot_inv, Supercell};

/// Fit second-order force constants from single-displacement force sets.
///
/// Only the rows of atoms that appear displaced in the dataset are
/// populated; with rich enough site symmetry a single displacement
/// direction per atom suffices.  Rank deficiency (site symmetry too poor
/// for the measured directions) is *not* detected; the unseen directions
/// quietly come out zero.
pub fn fit_fc2(
    cell: &Supercell,
    dataset: &[SingleDisplacement],
    symm: &SiteSymmetries,
) -> FailResult<Fc2>
{
    let num_atoms = cell.num_atoms();
    ensure!(num_atoms > 0, "empty supercell");
    ensure!(!dataset.is_empty(), "empty displacement dataset");
    ensure!(
        symm.num_atoms() == num_atoms,
        "site symmetry describes {} atoms, supercell has {}", symm.num_atoms(), num_atoms,
    );
    for meas in dataset {
        meas.validate(num_atoms)?;
    }

    let atoms = displaced_atoms(dataset);
    info!(
        "fitting second-order force constants: {} atoms, {} displaced, {} measurements",
        num_atoms, atoms.len(), dataset.len(),
    );

    let mut fc2 = Fc2::zeros(num_atoms);
    for atom in atoms {
        fit_blocks_of_atom(cell, dataset, symm, atom, &mut fc2)?;
    }
    Ok(fc2)
}

/// Distinct displaced atoms, ascending.
fn displaced_atoms(dataset: &[SingleDisplacement]) -> Vec<usize> {
    let mut atoms: Vec<usize> = dataset.iter().map(|meas| meas.atom).collect();
    atoms.sort();
    atoms.dedup();
    atoms
}

fn fit_blocks_of_atom(
    cell: &Supercell,
    dataset: &[SingleDisplacement],
    symm: &SiteSymmetries,
    atom: usize,
    fc2: &mut Fc2,
) -> FailResult<()>
{
    let measurements: Vec<&SingleDisplacement> =
        dataset.iter().filter(|meas| meas.atom == atom).collect();

    let site_syms = symm.site_symmetry(atom);
    let carts = cart_rotations(cell.lattice(), site_syms);
    let rot_maps = atoms_sent_by_rot_inv(
        cell.lattice(), &cell.fracs_about(atom), site_syms, symm.symprec(),
    )?;

    debug!(
        "fc2: atom {}: {} displacements x {} site operations",
        atom, measurements.len(), site_syms.len(),
    );

    let rot_disps = rotated_displacements(&measurements, &carts);
    let pinv = left_pseudoinverse(rot_disps)?;

    for target in 0..cell.num_atoms() {
        let forces = force_matrix(&measurements, &carts, &rot_maps, target);
        let phi = -(&pinv * &forces);
        fc2[(atom, target)] = M33::from_fn(|r, c| phi[(r, c)]);
    }
    Ok(())
}

/// Stack every site-operation image of every displacement into a
/// `(measurements x operations, 3)` design matrix.
/// Rows are displacement-major, then operation -- the force matrix must
/// follow the same order.
fn rotated_displacements(
    measurements: &[&SingleDisplacement],
    carts: &[M33],
) -> DMatrix<f64> {
    let mut rows = Vec::with_capacity(measurements.len() * carts.len() * 3);
    for meas in measurements {
        for cart in carts {
            let u = cart * &meas.displacement;
            rows.extend_from_slice(&*u);
        }
    }
    DMatrix::from_row_slice(measurements.len() * carts.len(), 3, &rows)
}

/// The observation matrix matching `rotated_displacements`, for one target
/// atom: under operation `s`, the force felt at the target is the rotated
/// force that was measured at the atom `s^-1` sends the target to.
fn force_matrix(
    measurements: &[&SingleDisplacement],
    carts: &[M33],
    rot_maps: &[Vec<usize>],
    target: usize,
) -> DMatrix<f64> {
    let mut rows = Vec::with_capacity(measurements.len() * carts.len() * 3);
    for meas in measurements {
        for (cart, map) in izip!(carts, rot_maps) {
            let force = cart * &meas.forces[map[target]];
            rows.extend_from_slice(&*force);
        }
    }
    DMatrix::from_row_slice(measurements.len() * carts.len(), 3, &rows)
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::SiteSymmetries;
    use fcfit_array_types::{mat, V3};
    use fcfit_structure::{CoordsKind, Lattice};

    // The textbook sanity check: two atoms, no symmetry beyond the
    // identity, one displacement.  K = -F / u componentwise.
    #[test]
    fn two_atom_scenario() {
        let cell = Supercell::new(
            Lattice::cubic(4.0),
            CoordsKind::Fracs(vec![V3([0.0; 3]), V3([0.5, 0.0, 0.0])]),
        );
        let dataset = vec![SingleDisplacement {
            atom: 0,
            displacement: V3([0.01, 0.0, 0.0]),
            forces: vec![V3([-1.0, 0.0, 0.0]), V3([1.0, 0.0, 0.0])],
        }];
        let symm = SiteSymmetries::identity(2, 1e-5);

        let fc2 = fit_fc2(&cell, &dataset, &symm).unwrap();

        assert_close!(abs=1e-9, fc2[(0, 0)], mat::from_array([
            [100.0, 0.0, 0.0],
            [  0.0, 0.0, 0.0],
            [  0.0, 0.0, 0.0],
        ]));
        assert_close!(abs=1e-9, fc2[(0, 1)], mat::from_array([
            [-100.0, 0.0, 0.0],
            [   0.0, 0.0, 0.0],
            [   0.0, 0.0, 0.0],
        ]));
        // undisplaced rows stay zero
        assert_eq!(fc2[(1, 0)], M33::zero());
    }

    #[test]
    fn rejects_mismatched_force_sets() {
        let cell = Supercell::new(
            Lattice::cubic(4.0),
            CoordsKind::Fracs(vec![V3([0.0; 3]), V3([0.5, 0.0, 0.0])]),
        );
        let dataset = vec![SingleDisplacement {
            atom: 0,
            displacement: V3([0.01, 0.0, 0.0]),
            forces: vec![V3::zero()],
        }];
        let symm = SiteSymmetries::identity(2, 1e-5);
        assert!(fit_fc2(&cell, &dataset, &symm).is_err());
    }
}
