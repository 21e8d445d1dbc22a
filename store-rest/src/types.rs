//! Wire types for the product-image endpoints.
//!
//! The backend speaks Spanish on the wire (`urlImagen`, `orden`,
//! `idProducto`); these DTOs keep that vocabulary at the serde boundary and
//! convert into the neutral domain records everything else consumes.

use serde::{Deserialize, Serialize};
use store_traits::{ImageId, ImageRecord, ProductId};

/// A product image as the backend returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: i64,
    pub url_imagen: String,
    pub orden: u32,
    pub id_producto: ProductRef,
}

/// The nested product reference carried on every image record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: i64,
}

impl ImageDto {
    pub fn into_record(self) -> ImageRecord {
        ImageRecord {
            id: ImageId::new(self.id),
            product_id: ProductId::new(self.id_producto.id),
            url: self.url_imagen,
            position: self.orden,
        }
    }
}

/// Body of a successful (or refused) DELETE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponseDto {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_dto() {
        let json = r#"{
            "id": 7,
            "urlImagen": "/uploads/productos/7-front.webp",
            "orden": 2,
            "idProducto": { "id": 42 }
        }"#;

        let dto: ImageDto = serde_json::from_str(json).unwrap();
        let record = dto.into_record();

        assert_eq!(record.id, ImageId::new(7));
        assert_eq!(record.product_id, ProductId::new(42));
        assert_eq!(record.url, "/uploads/productos/7-front.webp");
        assert_eq!(record.position, 2);
    }

    #[test]
    fn test_parse_delete_response() {
        let json = r#"{ "success": true, "message": "Imagen eliminada" }"#;
        let dto: DeleteResponseDto = serde_json::from_str(json).unwrap();
        assert!(dto.success);
        assert_eq!(dto.message, "Imagen eliminada");
    }
}
