use serde::{Serialize, Serializer};

/// a row of the OD result table
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OdRow {
    pub origin_id: usize,
    pub destination_id: usize,
    pub demand: f64,
}

/// a row of the edge flow result table. `edge_id` is assigned sequentially in
/// enumeration order and the flow is written with three decimal places.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EdgeFlowRow {
    pub edge_id: usize,
    pub from_stop: usize,
    pub to_stop: usize,
    #[serde(serialize_with = "serialize_three_decimals")]
    pub flow: f64,
}

fn serialize_three_decimals<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{value:.3}"))
}
