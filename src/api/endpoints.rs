// Floor-plan service endpoint functions.
// Provides typed methods for the houses, floors, 3D objects, and file endpoints.

use reqwest::multipart::{Form, Part};

use crate::error::Result;

use super::client::ApiClient;
use super::types::{
    CreateFloor, CreateHouse, CreateObject3d, FileUpload, Floor, House, Object3d, ObjectTemplate,
};

impl ApiClient {
    /// Create a new house.
    pub async fn create_house(&self, house: &CreateHouse) -> Result<House> {
        let response = self.post_json("/houses", house).await?;
        let house: House = response.json().await?;
        Ok(house)
    }

    /// Get all houses.
    pub async fn get_houses(&self) -> Result<Vec<House>> {
        let response = self.get("/houses").await?;
        let houses: Vec<House> = response.json().await?;
        Ok(houses)
    }

    /// Get a specific house with its floors.
    pub async fn get_house(&self, uuid: &str) -> Result<House> {
        let response = self.get(&format!("/houses/{}", uuid)).await?;
        let house: House = response.json().await?;
        Ok(house)
    }

    /// Create a new floor under a house.
    pub async fn create_floor(&self, floor: &CreateFloor) -> Result<Floor> {
        let response = self.post_json("/floors", floor).await?;
        let floor: Floor = response.json().await?;
        Ok(floor)
    }

    /// Get a specific floor.
    pub async fn get_floor(&self, uuid: &str) -> Result<Floor> {
        let response = self.get(&format!("/floors/{}", uuid)).await?;
        let floor: Floor = response.json().await?;
        Ok(floor)
    }

    /// Update a floor (full replacement).
    pub async fn update_floor(&self, uuid: &str, floor: &Floor) -> Result<Floor> {
        let response = self
            .patch_json(&format!("/floors/{}", uuid), floor)
            .await?;
        let floor: Floor = response.json().await?;
        Ok(floor)
    }

    /// Place a 3D object on a floor.
    pub async fn create_object3d(&self, object: &CreateObject3d) -> Result<Object3d> {
        let response = self.post_json("/object3ds", object).await?;
        let object: Object3d = response.json().await?;
        Ok(object)
    }

    /// Upload a floor-plan PNG. The server responds with URLs for the stored
    /// image and the 3D models generated from it.
    pub async fn upload_png(&self, bytes: Vec<u8>) -> Result<FileUpload> {
        let part = Part::bytes(bytes)
            .file_name("floor.png")
            .mime_str("image/png")?;
        let form = Form::new().part("in_file", part);
        let response = self.post_multipart("/file/", &[], form).await?;
        let upload: FileUpload = response.json().await?;
        Ok(upload)
    }

    /// Upload a 3D model with its placement data, returning the stored file id.
    pub async fn upload_model(&self, bytes: Vec<u8>, data: &str) -> Result<String> {
        let part = Part::bytes(bytes)
            .file_name("model.glb")
            .mime_str("model/gltf-binary")?;
        let form = Form::new().part("in_file", part);
        let response = self
            .post_multipart("/file/3d-model", &[("data", data)], form)
            .await?;
        // The server returns the id as a JSON string literal.
        let id = response.text().await?;
        Ok(id.trim_matches('"').to_string())
    }

    /// Absolute URL for a stored file, suitable as a blob cache key.
    pub fn file_url(&self, id: &str) -> String {
        self.url(&format!("/file/{}", id))
    }
}

/// Built-in catalogue of placeable object templates.
pub fn object_templates() -> Vec<ObjectTemplate> {
    vec![
        ObjectTemplate {
            uuid: "1".to_string(),
            name: "Elevator".to_string(),
            model: "/elevator.glb".to_string(),
            data: "{}".to_string(),
        },
        ObjectTemplate {
            uuid: "2".to_string(),
            name: "Escalator".to_string(),
            model: "/escalator.glb".to_string(),
            data: "{}".to_string(),
        },
        ObjectTemplate {
            uuid: "3".to_string(),
            name: "Electrical Box".to_string(),
            model: "/eletric_box.glb".to_string(),
            data: "{}".to_string(),
        },
    ]
}
