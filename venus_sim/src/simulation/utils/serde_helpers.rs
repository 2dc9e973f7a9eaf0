// venus_sim/src/simulation/utils/serde_helpers.rs

/// (De)serializes a `GridPosition` as a plain `[x, y]` array, which is how
/// origins are written in mission files.
pub mod grid_position_from_array {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use venus_core::types::GridPosition;

    pub fn serialize<S>(position: &GridPosition, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq([position.x, position.y].iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<GridPosition, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr: [i64; 2] = Deserialize::deserialize(deserializer)?;
        Ok(GridPosition::new(arr[0], arr[1]))
    }
}
