// Floor-plan service API types.
// Defines structs for serializing requests to and deserializing responses from the REST API.

use serde::{Deserialize, Serialize};

/// A house with its address, map position, and floors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    pub uuid: String,
    pub name: String,
    pub address: String,
    pub image: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
}

/// Payload for creating a house (uuid is assigned by the server).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHouse {
    pub name: String,
    pub address: String,
    pub image: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
}

/// A single floor of a house, with its plan image and generated 3D model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    pub uuid: String,
    pub name: String,
    pub index: i32,
    pub height: f64,
    #[serde(rename = "floor_3D")]
    pub floor_3d: String,
    pub floor_png: String,
}

/// Payload for creating a floor under a house.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFloor {
    pub name: String,
    pub index: i32,
    pub height: f64,
    #[serde(rename = "floor_3D")]
    pub floor_3d: String,
    pub floor_png: String,
    pub house_id: String,
}

/// A 3D object placed on a floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Object3d {
    pub uuid: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotation: f64,
    pub data: String,
    pub file_uuid: String,
    pub floor_id: String,
}

/// Payload for placing a 3D object on a floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateObject3d {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotation: f64,
    pub data: String,
    pub file_uuid: String,
    pub floor_id: String,
}

/// A placeable object template from the built-in catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectTemplate {
    pub uuid: String,
    pub name: String,
    /// URL of the template's 3D model.
    pub model: String,
    pub data: String,
}

/// Server response to a floor-plan PNG upload: derived asset URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    pub floor_png: String,
    #[serde(rename = "floor_3D")]
    pub floor_3d: String,
    #[serde(rename = "floor_3D_walls")]
    pub floor_3d_walls: String,
}
