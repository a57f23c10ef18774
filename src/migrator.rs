use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_cows_table::Migration),
            Box::new(m20240101_000002_create_milk_productions_table::Migration),
            Box::new(m20240101_000003_create_health_records_table::Migration),
            Box::new(m20240101_000004_create_vaccinations_table::Migration),
            Box::new(m20240101_000005_create_customers_table::Migration),
            Box::new(m20240101_000006_create_sales_table::Migration),
            Box::new(m20240101_000007_create_payments_table::Migration),
            Box::new(m20240101_000008_create_expenses_table::Migration),
            Box::new(m20240101_000009_create_users_table::Migration),
            Box::new(m20240101_000010_create_sessions_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_cows_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_cows_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Cows::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Cows::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Cows::Tag)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Cows::Name).string().not_null())
                        .col(ColumnDef::new(Cows::Breed).string().null())
                        .col(ColumnDef::new(Cows::DateOfBirth).date().null())
                        .col(
                            ColumnDef::new(Cows::IsPregnant)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Cows::ExpectedCalvingDate).date().null())
                        .col(ColumnDef::new(Cows::Status).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_cows_status")
                        .table(Cows::Table)
                        .col(Cows::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Cows::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Cows {
        Table,
        Id,
        Tag,
        Name,
        Breed,
        DateOfBirth,
        IsPregnant,
        ExpectedCalvingDate,
        Status,
    }
}

mod m20240101_000002_create_milk_productions_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_milk_productions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(MilkProductions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MilkProductions::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MilkProductions::CowId).integer().not_null())
                        .col(ColumnDef::new(MilkProductions::Date).date().not_null())
                        .col(
                            ColumnDef::new(MilkProductions::MorningQty)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MilkProductions::EveningQty)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MilkProductions::RecordedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_milk_productions_cow_id")
                        .table(MilkProductions::Table)
                        .col(MilkProductions::CowId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_milk_productions_date")
                        .table(MilkProductions::Table)
                        .col(MilkProductions::Date)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MilkProductions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum MilkProductions {
        Table,
        Id,
        CowId,
        Date,
        MorningQty,
        EveningQty,
        RecordedAt,
    }
}

mod m20240101_000003_create_health_records_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_health_records_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(HealthRecords::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(HealthRecords::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(HealthRecords::CowId).integer().not_null())
                        .col(ColumnDef::new(HealthRecords::Date).date().not_null())
                        .col(
                            ColumnDef::new(HealthRecords::Description)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(HealthRecords::Treatment).string().null())
                        .col(ColumnDef::new(HealthRecords::Veterinarian).string().null())
                        .col(
                            ColumnDef::new(HealthRecords::RecordedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_health_records_cow_id")
                        .table(HealthRecords::Table)
                        .col(HealthRecords::CowId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(HealthRecords::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum HealthRecords {
        Table,
        Id,
        CowId,
        Date,
        Description,
        Treatment,
        Veterinarian,
        RecordedAt,
    }
}

mod m20240101_000004_create_vaccinations_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_vaccinations_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Vaccinations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Vaccinations::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Vaccinations::CowId).integer().not_null())
                        .col(
                            ColumnDef::new(Vaccinations::VaccineName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Vaccinations::AdministeredOn)
                                .date()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Vaccinations::NextDueOn).date().null())
                        .col(ColumnDef::new(Vaccinations::Notes).string().null())
                        .col(ColumnDef::new(Vaccinations::Status).string().not_null())
                        .col(
                            ColumnDef::new(Vaccinations::RecordedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_vaccinations_next_due_on")
                        .table(Vaccinations::Table)
                        .col(Vaccinations::NextDueOn)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Vaccinations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Vaccinations {
        Table,
        Id,
        CowId,
        VaccineName,
        AdministeredOn,
        NextDueOn,
        Notes,
        Status,
        RecordedAt,
    }
}

mod m20240101_000005_create_customers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::ContactInfo).string().null())
                        .col(
                            ColumnDef::new(Customers::Balance)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Customers {
        Table,
        Id,
        Name,
        ContactInfo,
        Balance,
    }
}

mod m20240101_000006_create_sales_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_sales_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sales::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sales::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Sales::CustomerId).integer().not_null())
                        .col(ColumnDef::new(Sales::Date).date().not_null())
                        .col(ColumnDef::new(Sales::QuantityLiters).decimal().not_null())
                        .col(ColumnDef::new(Sales::UnitPrice).decimal().not_null())
                        .col(ColumnDef::new(Sales::TotalAmount).decimal().not_null())
                        .col(
                            ColumnDef::new(Sales::IsPaid)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Sales::RecordedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_customer_id")
                        .table(Sales::Table)
                        .col(Sales::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_date")
                        .table(Sales::Table)
                        .col(Sales::Date)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sales::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Sales {
        Table,
        Id,
        CustomerId,
        Date,
        QuantityLiters,
        UnitPrice,
        TotalAmount,
        IsPaid,
        RecordedAt,
    }
}

mod m20240101_000007_create_payments_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_payments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Payments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Payments::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Payments::CustomerId).integer().not_null())
                        .col(ColumnDef::new(Payments::Date).date().not_null())
                        .col(
                            ColumnDef::new(Payments::AmountReceived)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Payments::Description).string().null())
                        .col(ColumnDef::new(Payments::RecordedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_payments_customer_id")
                        .table(Payments::Table)
                        .col(Payments::CustomerId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Payments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Payments {
        Table,
        Id,
        CustomerId,
        Date,
        AmountReceived,
        Description,
        RecordedAt,
    }
}

mod m20240101_000008_create_expenses_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_expenses_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Expenses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Expenses::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Expenses::Date).date().not_null())
                        .col(ColumnDef::new(Expenses::Category).string().not_null())
                        .col(ColumnDef::new(Expenses::Amount).decimal().not_null())
                        .col(ColumnDef::new(Expenses::Description).string().null())
                        .col(ColumnDef::new(Expenses::RecordedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_expenses_date")
                        .table(Expenses::Table)
                        .col(Expenses::Date)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Expenses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Expenses {
        Table,
        Id,
        Date,
        Category,
        Amount,
        Description,
        RecordedAt,
    }
}

mod m20240101_000009_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000009_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Users::Username)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Users {
        Table,
        Id,
        Username,
        PasswordHash,
        CreatedAt,
    }
}

mod m20240101_000010_create_sessions_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000010_create_sessions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sessions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sessions::Token)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Sessions::UserId).integer().not_null())
                        .col(ColumnDef::new(Sessions::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Sessions::ExpiresAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sessions_user_id")
                        .table(Sessions::Table)
                        .col(Sessions::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sessions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Sessions {
        Table,
        Token,
        UserId,
        CreatedAt,
        ExpiresAt,
    }
}
