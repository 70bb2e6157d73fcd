use crate::{FracRot, Lattice};
use fcfit_array_types::V3;
use failure::Backtrace;

/// Failure of a position-matching search.
///
/// Either of these means the supplied symmetry operations and atomic
/// positions are mutually inconsistent; there is no recovery, the whole
/// fitting run is invalid.
#[derive(Debug, Fail)]
pub enum PositionMatchError {
    #[fail(display = "no atom occupies the image of atom {} under operation {}", atom, oper)]
    NoMatch {
        oper: usize,
        atom: usize,
        backtrace: Backtrace,
    },
    #[fail(display = "operation {} maps two atoms onto atom {}", oper, atom)]
    DuplicateMatch {
        oper: usize,
        atom: usize,
        backtrace: Backtrace,
    },
}

/// Find, per operation, the atom whose image each site is.
///
/// `fracs` are fractional positions relative to the rotation center (the
/// atom whose site symmetry `rots` is).  On success, `map[s][to] = from`
/// where operation `s` sends `fracs[from]` onto `fracs[to]` modulo lattice
/// translations; equivalently, `from` is where the *inverse* of `s` sends
/// `to`.  Positions match when their minimum-image cartesian distance is
/// below `tol`.
///
/// Each row of the result is checked to be a permutation of the atoms.
pub fn atoms_sent_by_rot_inv(
    lattice: &Lattice,
    fracs: &[V3],
    rots: &[FracRot],
    tol: f64,
) -> Result<Vec<Vec<usize>>, PositionMatchError>
{Ok({
    let mut maps = Vec::with_capacity(rots.len());
    for (oper, rot) in rots.iter().enumerate() {
        let rotated = rot.transform_fracs(fracs);

        const UNSET: usize = std::usize::MAX;
        let mut used = vec![false; fracs.len()];
        let mut map = vec![UNSET; fracs.len()];
        for (to, target) in fracs.iter().enumerate() {
            for (from, image) in rotated.iter().enumerate() {
                let distance2 = {
                    let diff = (target - image).map(|x| x - x.round());
                    let cart = diff * lattice.matrix();
                    cart.sqnorm()
                };
                if distance2 < tol * tol {
                    if used[from] {
                        return Err(PositionMatchError::DuplicateMatch {
                            oper, atom: to, backtrace: Backtrace::new(),
                        });
                    }
                    used[from] = true;
                    map[to] = from;
                    break;
                }
            }
            if map[to] == UNSET {
                return Err(PositionMatchError::NoMatch {
                    oper, atom: to, backtrace: Backtrace::new(),
                });
            }
        }
        trace!("operation {}: site map {:?}", oper, map);
        maps.push(map);
    }
    maps
})}
