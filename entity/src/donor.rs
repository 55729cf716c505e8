use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "donor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub donor_type_id: i32,
    pub alias_id: i32,
    pub external_donor_id: Option<String>,
    pub external_entity_id: Option<String>,
    pub postcode: Option<String>,
    pub company_registration_number: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::donor_alias::Entity",
        from = "Column::AliasId",
        to = "super::donor_alias::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    DonorAlias,
    #[sea_orm(
        belongs_to = "super::donor_type::Entity",
        from = "Column::DonorTypeId",
        to = "super::donor_type::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    DonorType,
    #[sea_orm(has_many = "super::donation::Entity")]
    Donation,
}

impl Related<super::donor_alias::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DonorAlias.def()
    }
}

impl Related<super::donor_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DonorType.def()
    }
}

impl Related<super::donation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
