//! ParkingLot entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parking_lots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub lot_id: String,

    pub lot_name: String,
    pub location_id: String,

    /// indoor | outdoor
    pub location_type: String,

    /// Boundary centroid (outdoor) or marked point (indoor)
    #[sea_orm(nullable)]
    pub center_latitude: Option<f64>,

    #[sea_orm(nullable)]
    pub center_longitude: Option<f64>,

    pub is_reserved: bool,

    /// Space counter, kept in step with parking_spaces inserts/deletes
    pub spaces: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parking_location::Entity",
        from = "Column::LocationId",
        to = "super::parking_location::Column::LocationId"
    )]
    ParkingLocation,
    #[sea_orm(has_many = "super::lot_boundary::Entity")]
    LotBoundaries,
    #[sea_orm(has_many = "super::parking_space::Entity")]
    ParkingSpaces,
}

impl Related<super::parking_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingLocation.def()
    }
}

impl Related<super::lot_boundary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LotBoundaries.def()
    }
}

impl Related<super::parking_space::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingSpaces.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
