use std::error::Error;

use ndarray::array;
use rand::{rngs::SmallRng, SeedableRng};
use tabula::metrics::ToBinaryConfusionMatrix;
use tabula::prelude::*;
use tabula_ensemble::{Adaboost, AdaboostRecord};

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let mut rng = SmallRng::seed_from_u64(42);

    // 1. two overlapping blobs, split into training and validation data
    let (train, valid) = tabula_datasets::generate::sign_blobs(
        200,
        &array![-1., -1., 0.],
        &array![1., 1., 0.],
        &mut rng,
    )
    .shuffle(&mut rng)
    .split_with_ratio(0.8);

    // 2. a single stump as baseline
    let stump = Adaboost::params().n_estimators(1).fit(&train)?;
    let cm = stump.predict(&valid)?.confusion_matrix(valid.targets())?;
    println!("single stump accuracy: {:.2}", cm.accuracy());

    // 3. a boosted ensemble
    let model = Adaboost::params().n_estimators(50).fit(&train)?;
    let cm = model.predict(&valid)?.confusion_matrix(valid.targets())?;
    println!("boosted accuracy:      {:.2}", cm.accuracy());
    println!("{:?}", cm);

    for member in model.members().iter().take(5) {
        println!("alpha {:.3}: {}", member.alpha(), member.learner());
    }

    // 4. persist the model and restore it without retraining
    let record: AdaboostRecord<f64> = model.to_state();
    let restored = Adaboost::from_state(record)?;
    assert_eq!(restored.predict(&valid)?, model.predict(&valid)?);

    Ok(())
}
