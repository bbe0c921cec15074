use std::sync::Arc;

use crate::io::HistoricalDataset;
use crate::schema::{AttributeSpec, FeatureSchema};

pub fn small_catalog() -> Vec<AttributeSpec> {
    vec![
        AttributeSpec::Numeric {
            name: "ram_gb".to_string(),
            column: "ram_memoria_ram_GB".to_string(),
            min: 0.0,
            max: 256.0,
            default: 16.0,
        },
        AttributeSpec::OneHot {
            name: "device_type".to_string(),
            prefix: "tipo_".to_string(),
            default: "nan".to_string(),
        },
        AttributeSpec::OneHot {
            name: "product_type".to_string(),
            prefix: "tipo_producto_".to_string(),
            default: "nan".to_string(),
        },
        AttributeSpec::LabelEncoded {
            name: "brand".to_string(),
            column: "company_name_label".to_string(),
            labels: vec![
                "ASUS".to_string(),
                "Apple".to_string(),
                "Dell".to_string(),
                "Lenovo".to_string(),
            ],
            default: "ASUS".to_string(),
        },
        AttributeSpec::Numeric {
            name: "webcam".to_string(),
            column: "equip_webcam".to_string(),
            min: 0.0,
            max: 1.0,
            default: 0.0,
        },
    ]
}

/// Header row in dataset order; families are interleaved on purpose.
pub fn headers() -> Vec<String> {
    [
        "tipo_Desktop",
        "tipo_producto_Ultrabook",
        "ram_memoria_ram_GB",
        "tipo_Laptop",
        "tipo_producto_PC gaming",
        "company_name_label",
        "tipo_nan",
        "tipo_producto_nan",
        "equip_webcam",
    ]
    .iter()
    .map(|header| header.to_string())
    .collect()
}

pub fn small_schema() -> Arc<FeatureSchema> {
    Arc::new(FeatureSchema::from_headers(&small_catalog(), &headers()).unwrap())
}

/// One schema-ordered row: ram, device (Desktop/Laptop/nan), product
/// (Ultrabook/PC gaming/nan), brand code, webcam.
pub fn row(ram: f64, device: usize, product: usize, brand: f64, webcam: f64) -> Vec<Option<f64>> {
    let mut values = vec![Some(ram)];
    values.extend((0..3).map(|i| Some(if i == device { 1.0 } else { 0.0 })));
    values.extend((0..3).map(|i| Some(if i == product { 1.0 } else { 0.0 })));
    values.push(Some(brand));
    values.push(Some(webcam));
    values
}

pub fn small_dataset() -> HistoricalDataset {
    let rows = vec![
        row(8.0, 1, 0, 1.0, 1.0),
        row(16.0, 1, 0, 1.0, 1.0),
        row(32.0, 0, 1, 2.0, 0.0),
        row(16.0, 1, 2, 3.0, 1.0),
        row(64.0, 0, 1, 2.0, 0.0),
    ];
    HistoricalDataset::new(
        small_schema(),
        rows,
        vec![900.0, 1200.0, 1500.0, 700.0, 2500.0],
        vec![
            "Apple MacBook Air".to_string(),
            "Apple MacBook Pro".to_string(),
            "Dell XPS Tower".to_string(),
            String::new(),
            "Dell Alienware Aurora".to_string(),
        ],
        "fixture",
    )
    .unwrap()
}

/// Two stumps over ram and webcam with base score 6.
pub const PRICE_MODEL: &str = r#"{
  "learner": {
    "feature_names": ["ram_memoria_ram_GB", "equip_webcam"],
    "feature_types": ["float", "float"],
    "gradient_booster": {
      "model": {
        "gbtree_model_param": {"num_trees": "2"},
        "trees": [
          {
            "left_children": [1, -1, -1],
            "right_children": [2, -1, -1],
            "split_indices": [0, 0, 0],
            "split_conditions": [12.0, 0.5, 1.0],
            "default_left": [1, 0, 0]
          },
          {
            "left_children": [1, -1, -1],
            "right_children": [2, -1, -1],
            "split_indices": [1, 0, 0],
            "split_conditions": [0.5, -0.1, 0.2],
            "default_left": [false, false, false]
          }
        ]
      },
      "name": "gbtree"
    },
    "learner_model_param": {"base_score": "[6E0]", "num_feature": "2"}
  },
  "version": [2, 0, 3]
}"#;
