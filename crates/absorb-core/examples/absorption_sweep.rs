//! Evaluates the default absorber configuration (50 mm layer,
//! σ = 20000 Pa·s/m², 100 Hz to 10 kHz) for each model variant and prints
//! the absorption coefficient at octave band centres.
//!
//! Run with:
//!   cargo run -p absorb-core --example absorption_sweep

use absorb_core::{AbsorberConfig, ModelVariant};

fn main() -> absorb_core::Result<()> {
    println!("=== Delany-Bazley Absorption Sweep ===");

    let base = AbsorberConfig::default();
    println!(
        "sigma={} Pa·s/m², rho={} kg/m³, c={} m/s, d={} m",
        base.material.flow_resistivity,
        base.material.air_density,
        base.material.sound_speed,
        base.thickness
    );

    let bands = [125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0];
    print!("{:>16}", "f (Hz)");
    for f in &bands {
        print!("{f:>8.0}");
    }
    println!();

    for variant in ModelVariant::ALL {
        let config = AbsorberConfig {
            variant,
            ..base.clone()
        };
        let result = absorb_core::compute(&config)?;
        println!(
            "{:>16} ({} bins)",
            variant.as_str(),
            result.frequencies.len()
        );
        print!("{:>16}", "");
        for band in bands {
            // The default grid has 1 Hz spacing, so each band centre is a bin.
            match result.frequencies.iter().position(|&f| f == band) {
                Some(i) => print!("{:>8.3}", result.absorption[i]),
                None => print!("{:>8}", "-"),
            }
        }
        println!();
    }

    Ok(())
}
