/***************************************/
/*        3rd party libraries          */
/***************************************/
use rand::Rng;

/// Picks a uniformly random source floor and a different, uniformly random
/// target floor. `n_floors` must be at least 2.
pub fn random_trip<R: Rng + ?Sized>(rng: &mut R, n_floors: u8) -> (u8, u8) {
    let source = rng.gen_range(0..n_floors);
    let mut target = rng.gen_range(0..n_floors - 1);
    if target >= source {
        target += 1;
    }
    (source, target)
}

/***************************************/
/*             Unit tests              */
/***************************************/
