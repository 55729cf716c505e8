use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "donation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub donor_id: i32,
    pub recipient_id: i32,
    pub donation_type_id: i32,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub value: Decimal,
    pub date: Date,
    #[sea_orm(unique)]
    pub external_ref: String,
    pub is_legacy: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::donor::Entity",
        from = "Column::DonorId",
        to = "super::donor::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Donor,
    #[sea_orm(
        belongs_to = "super::recipient::Entity",
        from = "Column::RecipientId",
        to = "super::recipient::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Recipient,
    #[sea_orm(
        belongs_to = "super::donation_type::Entity",
        from = "Column::DonationTypeId",
        to = "super::donation_type::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    DonationType,
}

impl Related<super::donor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donor.def()
    }
}

impl Related<super::recipient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipient.def()
    }
}

impl Related<super::donation_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DonationType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
