//! Third-order force-constant fitting from double-displacement force sets.
//!
//! Each measurement holds one atom at a fixed first displacement and
//! displaces a second atom on top of it.  Measuring a second displacement
//! at every atom is expensive, so data for atoms that were never displaced
//! second is synthesized first: the site symmetry compatible with the
//! first displacement maps some measured atom onto each unmeasured one,
//! and the measured entry rotates along.
//!
//! The regression model per (first, second) pair has a constant column,
//! both rotated displacements, and their outer product:
//!
//! ```text
//!     [ 1 | R u1 | R u2 | (R u1) (x) (R u2) ]      (16 columns)
//! ```
//!
//! The second-order coefficients fall out of the same solve; they are
//! accumulated over all second atoms and averaged at the end.

use crate::dataset::{FirstDisplacement, SecondDisplacement};
use crate::symmetry::{cart_rotations, reduced_site_symmetry, SiteSymmetries};
use crate::tensor::{Fc2, Fc3, M333};
use crate::FailResult;
use failure::Backtrace;
use fcfit_array_types::{M3, M33, V3};
use fcfit_linalg::{left_pseudoinverse, DMatrix};
use fcfit_structure::{atoms_sent_by_rot_inv, Supercell};
use std::collections::BTreeSet;

/// Raised by symmetry completion when no operation can synthesize data
/// for an atom that was never displaced second.  The dataset is too
/// sparse for the symmetry it claims; the run cannot continue.
#[derive(Debug, Fail)]
#[fail(display = "no operation sends a measured second atom onto atom {} (first atom {})", second, first)]
pub struct SymmetryCompletionError {
    pub first: usize,
    pub second: usize,
    backtrace: Backtrace,
}

/// Fit third-order force constants, along with the second-order ones that
/// fall out of the same regression.
///
/// Only rows of atoms that appear as first displacements are populated.
/// The second-order part of each populated row is the average of the
/// per-second-atom solutions over the *total* atom count; see DESIGN.md
/// for why this normalization is preserved as-is.
pub fn fit_fc3(
    cell: &Supercell,
    dataset: &[FirstDisplacement],
    symm: &SiteSymmetries,
) -> FailResult<(Fc2, Fc3)>
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

    let atoms = first_atoms(dataset);
    info!(
        "fitting third-order force constants: {} atoms, {} first-displaced, {} measurements",
        num_atoms, atoms.len(), dataset.len(),
    );

    let mut fc2 = Fc2::zeros(num_atoms);
    let mut fc3 = Fc3::zeros(num_atoms);
    for atom in atoms {
        let group: Vec<FirstDisplacement> =
            dataset.iter().filter(|meas| meas.atom == atom).cloned().collect();
        fit_blocks_of_first_atom(cell, group, symm, &mut fc2, &mut fc3)?;
    }
    Ok((fc2, fc3))
}

/// Distinct first displaced atoms, ascending.
fn first_atoms(dataset: &[FirstDisplacement]) -> Vec<usize> {
    let mut atoms: Vec<usize> = dataset.iter().map(|meas| meas.atom).collect();
    atoms.sort();
    atoms.dedup();
    atoms
}

fn fit_blocks_of_first_atom(
    cell: &Supercell,
    mut group: Vec<FirstDisplacement>,
    symm: &SiteSymmetries,
    fc2: &mut Fc2,
    fc3: &mut Fc3,
) -> FailResult<()>
{
    let first = group[0].atom;
    for entry in &mut group {
        complete_second_displacements(cell, symm, entry)?;
    }

    let site_syms = symm.site_symmetry(first);
    let carts = cart_rotations(cell.lattice(), site_syms);
    let rot_maps = atoms_sent_by_rot_inv(
        cell.lattice(), &cell.fracs_about(first), site_syms, symm.symprec(),
    )?;

    let num_atoms = cell.num_atoms();
    for second in 0..num_atoms {
        // Stack design rows and (per target atom) force rows over every
        // first-displacement entry of the group, keeping both stacks in
        // the same row order: entry, then pair, then operation.
        let mut design_rows: Vec<f64> = vec![];
        let mut force_rows: Vec<Vec<f64>> = vec![vec![]; num_atoms];
        let mut num_rows = 0;
        for entry in &group {
            let pairs: Vec<&SecondDisplacement> =
                entry.second_atoms.iter().filter(|s| s.atom == second).collect();

            for pair in &pairs {
                for cart in &carts {
                    push_design_row(&mut design_rows, cart, &entry.displacement, &pair.displacement);
                }
            }
            for (target, rows) in force_rows.iter_mut().enumerate() {
                for pair in &pairs {
                    for (cart, map) in izip!(&carts, &rot_maps) {
                        let force = cart * &pair.forces[map[target]];
                        rows.extend_from_slice(&*force);
                    }
                }
            }
            num_rows += pairs.len() * carts.len();
        }
        ensure!(
            num_rows > 0,
            "no measurement pairs first atom {} with second atom {}", first, second,
        );
        debug!("fc3: pair ({}, {}): design matrix {} x 16", first, second, num_rows);

        let design = DMatrix::from_row_slice(num_rows, 16, &design_rows);
        let pinv = left_pseudoinverse(design)?;

        for target in 0..num_atoms {
            let forces = DMatrix::from_row_slice(num_rows, 3, &force_rows[target]);
            let coeffs = -(&pinv * &forces); // (16, 3)
            fc2[(first, target)] += second_order_slice(&coeffs);
            fc3[(first, second, target)] = third_order_slice(&coeffs);
        }
    }

    // Average the accumulated second-order part over the atom count.
    for target in 0..num_atoms {
        fc2[(first, target)] = fc2[(first, target)] / num_atoms as f64;
    }
    Ok(())
}

/// One design row: `[1, R u1, R u2, (R u1) (x) (R u2)]`.
fn push_design_row(rows: &mut Vec<f64>, cart: &M33, u1: &V3, u2: &V3) {
    let ru1 = cart * u1;
    let ru2 = cart * u2;
    rows.push(1.0);
    rows.extend_from_slice(&*ru1);
    rows.extend_from_slice(&*ru2);
    for p in 0..3 {
        for q in 0..3 {
            rows.push(ru1[p] * ru2[q]);
        }
    }
}

/// Coefficient rows 1..4: the second-order block.
fn second_order_slice(coeffs: &DMatrix<f64>) -> M33
{ M33::from_fn(|r, c| coeffs[(1 + r, c)]) }

/// Coefficient rows 7..16, unflattened: `block[p][q][r]` multiplies
/// `u1[p] * u2[q]` in the force component `r`.
fn third_order_slice(coeffs: &DMatrix<f64>) -> M333 {
    let plane = |p: usize| M33::from_fn(|q, r| coeffs[(7 + 3 * p + q, r)]);
    M3([plane(0), plane(1), plane(2)])
}

/// Synthesize second-displacement entries for atoms never displaced second.
///
/// The scan over operations goes in list order, and the first operation
/// whose inverse-image of the unmeasured atom was measured wins; callers
/// (and reruns) see identical synthesized data every time.  Synthesized
/// entries are appended after the measured ones and never feed further
/// synthesis within the same entry.
fn complete_second_displacements(
    cell: &Supercell,
    symm: &SiteSymmetries,
    entry: &mut FirstDisplacement,
) -> FailResult<()>
{
    let first = entry.atom;

    // only operations that hold the first displacement fixed may move
    // second-displacement data around
    let direction = entry.displacement * cell.lattice().inverse_matrix();
    let reduced = reduced_site_symmetry(symm.site_symmetry(first), &direction, symm.symprec());
    let carts = cart_rotations(cell.lattice(), &reduced);
    let rot_maps = atoms_sent_by_rot_inv(
        cell.lattice(), &cell.fracs_about(first), &reduced, symm.symprec(),
    )?;

    let measured: BTreeSet<usize> = entry.second_atoms.iter().map(|s| s.atom).collect();

    let mut synthesized = vec![];
    for atom in 0..cell.num_atoms() {
        if measured.contains(&atom) {
            continue;
        }

        let found = izip!(&carts, &rot_maps)
            .map(|(cart, map)| (cart, map[atom]))
            .find(|&(_, from)| measured.contains(&from));
        let (cart, from) = match found {
            Some(x) => x,
            None => throw!(SymmetryCompletionError {
                first,
                second: atom,
                backtrace: Backtrace::new(),
            }),
        };

        trace!(
            "fc3: synthesizing second atom {} from {} (first atom {})",
            atom, from, first,
        );
        for meas in &entry.second_atoms {
            if meas.atom != from {
                continue;
            }
            synthesized.push(SecondDisplacement {
                atom,
                displacement: cart * &meas.displacement,
                forces: meas.forces.iter().map(|f| cart * f).collect(),
            });
        }
    }
    entry.second_atoms.extend(synthesized);
    Ok(())
}
