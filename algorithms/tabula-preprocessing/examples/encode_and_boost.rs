use std::error::Error;

use ndarray::{array, concatenate, Array1, Array2, Axis};
use tabula::prelude::*;
use tabula_ensemble::Adaboost;
use tabula_preprocessing::{MinMaxScaler, OneHotEncoder, SignLabelEncoder};

fn main() -> std::result::Result<(), Box<dyn Error>> {
    // raw records: a categorical and a numeric column, binary string labels
    let colors = array![
        ["red"], ["red"], ["blue"], ["green"], ["blue"], ["green"], ["red"], ["blue"]
    ];
    let sizes = array![[1.0], [8.0], [2.5], [9.0], [7.5], [3.0], [6.0], [0.5]];
    let labels = array!["no", "yes", "no", "yes", "yes", "no", "yes", "no"];

    // 1. encode the categorical column
    let encoder = OneHotEncoder::new().fit(&colors.view().into())?;
    let colors: tabula_preprocessing::Result<Array2<f64>> = encoder.transform(&colors);

    // 2. scale the numeric column into [0, 1]
    let scaler = MinMaxScaler::params().fit(&sizes.view().into())?;
    let sizes = scaler.transform(sizes)?;

    let records = concatenate(Axis(1), &[colors?.view(), sizes.view()])?;
    let names = encoder
        .feature_names()
        .into_iter()
        .chain(std::iter::once("size".to_string()))
        .collect::<Vec<_>>();

    // 3. map the labels onto -1 and +1
    let label_encoder = SignLabelEncoder::new().positive("yes").fit(&DatasetBase::new(
        records.view(),
        labels.view(),
    ))?;
    let targets: tabula_preprocessing::Result<Array1<f64>> = label_encoder.transform(&labels);

    let dataset = Dataset::new(records, targets?).with_feature_names(names);

    // 4. boost decision stumps on the encoded data
    let model = Adaboost::params().n_estimators(8).fit(&dataset)?;
    let predictions = model.predict(&dataset)?;

    println!("training labels:    {}", labels);
    println!(
        "predicted labels:   {}",
        label_encoder.inverse_transform(&predictions)
    );

    for (name, importance) in dataset
        .feature_names()
        .iter()
        .zip(model.feature_importances().iter())
    {
        println!("{:>12}: {:.3}", name, importance);
    }

    Ok(())
}
