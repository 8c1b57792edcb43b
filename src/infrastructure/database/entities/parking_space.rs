//! ParkingSpace entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "parking_spaces")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub parking_space_id: String,

    pub lot_id: String,

    /// Regular, Special, Female, Premium, EV, Family, ...
    pub parking_type: String,

    pub is_nearest: bool,
    pub is_covered: bool,
    pub is_wheelchair_accessible: bool,
    pub has_large_space: bool,
    pub is_well_lit_area: bool,
    pub has_ev_charging: bool,
    pub is_family_parking_area: bool,
    pub is_premium: bool,
    pub is_available: bool,

    /// "lat,lng" outdoors, floor/level label indoors
    #[sea_orm(nullable)]
    pub coordinates: Option<String>,

    /// Type held before the lot was reserved
    #[sea_orm(nullable)]
    pub original_type: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parking_lot::Entity",
        from = "Column::LotId",
        to = "super::parking_lot::Column::LotId"
    )]
    ParkingLot,
}

impl Related<super::parking_lot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingLot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
