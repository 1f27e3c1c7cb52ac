/// Example: k-point grids for an fcc crystal
///
/// Builds the cubic point group from its generators, expresses it in the fcc
/// primitive basis and asks for grids of increasing density.
use kpoint_lattice::symmetries::{close_group, operators_from_cartesian};
use kpoint_lattice::{GammaPolicy, KPointLatticeGenerator};
use nalgebra::Matrix3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Copper-like fcc cell, a = 3.6
    let a = 3.6;
    let prim = Matrix3::new(
        0.0, 0.5, 0.5,
        0.5, 0.0, 0.5,
        0.5, 0.5, 0.0,
    ) * a;
    let conventional = Matrix3::identity() * a;

    let four_fold = Matrix3::new(0, -1, 0, 1, 0, 0, 0, 0, 1);
    let three_fold = Matrix3::new(0, 0, 1, 1, 0, 0, 0, 1, 0);
    let cartesian: Vec<Matrix3<f64>> = close_group(&[four_fold, three_fold, -Matrix3::identity()])?
        .iter()
        .map(|op| op.cast::<f64>())
        .collect();
    let ops = operators_from_cartesian(&prim, &cartesian)?;
    println!("Point group order in the primitive basis: {}\n", ops.len());

    let mut generator = KPointLatticeGenerator::new(prim, conventional, ops, false)?;

    for policy in [GammaPolicy::Always, GammaPolicy::Auto] {
        generator.include_gamma(policy);
        println!("gamma = {}", policy);
        for min_distance in [10.0, 20.0, 30.0] {
            let lattice = generator.get_kpoint_lattice(min_distance, 1)?;
            println!(
                "   d >= {:>4.1}: {:>4} distinct of {:>5} total, actual distance {:.3}",
                min_distance,
                lattice.num_distinct_kpoints(),
                lattice.num_total_kpoints(),
                lattice.min_periodic_distance()
            );
        }
        println!();
    }

    generator.include_gamma(GammaPolicy::Auto);
    let lattice = generator.get_kpoint_lattice(15.0, 1)?;
    print!("{}", lattice.to_kpoints_string());

    Ok(())
}
