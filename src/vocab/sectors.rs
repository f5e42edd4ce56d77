//! Sector, subsector and original-inventory-sector vocabularies.

vocabulary! {
    /// Top-level economic sector, one per sector package
    pub enum Sector("sector") {
        Agriculture => "agriculture",
        Buildings => "buildings",
        FluorinatedGases => "fluorinated-gases",
        ForestryAndLandUse => "forestry-and-land-use",
        FossilFuelOperations => "fossil-fuel-operations",
        Manufacturing => "manufacturing",
        MineralExtraction => "mineral-extraction",
        Power => "power",
        Transportation => "transportation",
        Waste => "waste",
    }
}

vocabulary! {
    /// Subsector classification within a [`Sector`]
    pub enum Subsector("subsector") {
        // agriculture
        CroplandFires => "cropland-fires",
        EntericFermentationCattleFeedlot => "enteric-fermentation-cattle-feedlot",
        EntericFermentationCattlePasture => "enteric-fermentation-cattle-pasture",
        EntericFermentationOther => "enteric-fermentation-other",
        ManureLeftOnPastureCattle => "manure-left-on-pasture-cattle",
        ManureManagementCattleFeedlot => "manure-management-cattle-feedlot",
        ManureManagementOther => "manure-management-other",
        RiceCultivation => "rice-cultivation",
        SyntheticFertilizerApplication => "synthetic-fertilizer-application",
        OtherAgriculturalSoilEmissions => "other-agricultural-soil-emissions",
        // buildings
        ResidentialOnsiteFuelUsage => "residential-onsite-fuel-usage",
        NonResidentialOnsiteFuelUsage => "non-residential-onsite-fuel-usage",
        OtherOnsiteFuelUsage => "other-onsite-fuel-usage",
        // fluorinated-gases
        FluorinatedGases => "fluorinated-gases",
        // forestry-and-land-use
        ForestLandClearing => "forest-land-clearing",
        ForestLandDegradation => "forest-land-degradation",
        ForestLandFires => "forest-land-fires",
        NetForestLand => "net-forest-land",
        NetShrubgrass => "net-shrubgrass",
        NetWetland => "net-wetland",
        Removals => "removals",
        ShrubgrassFires => "shrubgrass-fires",
        WaterReservoirs => "water-reservoirs",
        WetlandFires => "wetland-fires",
        // fossil-fuel-operations
        CoalMining => "coal-mining",
        OilAndGasProduction => "oil-and-gas-production",
        OilAndGasRefining => "oil-and-gas-refining",
        OilAndGasTransport => "oil-and-gas-transport",
        OtherFossilFuelOperations => "other-fossil-fuel-operations",
        SolidFuelTransformation => "solid-fuel-transformation",
        // manufacturing
        Aluminum => "aluminum",
        Cement => "cement",
        Chemicals => "chemicals",
        FoodBeverageTobacco => "food-beverage-tobacco",
        Glass => "glass",
        IronAndSteel => "iron-and-steel",
        Lime => "lime",
        OtherChemicals => "other-chemicals",
        OtherManufacturing => "other-manufacturing",
        OtherMetals => "other-metals",
        PetrochemicalSteamCracking => "petrochemical-steam-cracking",
        PulpAndPaper => "pulp-and-paper",
        TextilesLeatherApparel => "textiles-leather-apparel",
        WoodAndWoodProducts => "wood-and-wood-products",
        // mineral-extraction
        BauxiteMining => "bauxite-mining",
        CopperMining => "copper-mining",
        IronMining => "iron-mining",
        RockQuarrying => "rock-quarrying",
        SandQuarrying => "sand-quarrying",
        // power
        ElectricityGeneration => "electricity-generation",
        HeatPlants => "heat-plants",
        OtherEnergyUse => "other-energy-use",
        // transportation
        DomesticAviation => "domestic-aviation",
        DomesticShipping => "domestic-shipping",
        InternationalAviation => "international-aviation",
        InternationalShipping => "international-shipping",
        OtherTransport => "other-transport",
        Railways => "railways",
        RoadTransportation => "road-transportation",
        // waste
        BiologicalTreatmentOfSolidWasteAndBiogenic => "biological-treatment-of-solid-waste-and-biogenic",
        DomesticWastewaterTreatmentAndDischarge => "domestic-wastewater-treatment-and-discharge",
        IncinerationAndOpenBurningOfWaste => "incineration-and-open-burning-of-waste",
        IndustrialWastewaterTreatmentAndDischarge => "industrial-wastewater-treatment-and-discharge",
        SolidWasteDisposal => "solid-waste-disposal",
    }
}

vocabulary! {
    /// Inventory sector as reported by the underlying source inventory.
    ///
    /// Current releases reuse the subsector names; the older release also
    /// used a handful of coarser groupings that are kept for compatibility.
    pub enum OriginalInventorySector("original inventory sector") {
        CroplandFires => "cropland-fires",
        EntericFermentationCattleFeedlot => "enteric-fermentation-cattle-feedlot",
        EntericFermentationCattlePasture => "enteric-fermentation-cattle-pasture",
        EntericFermentationOther => "enteric-fermentation-other",
        ManureLeftOnPastureCattle => "manure-left-on-pasture-cattle",
        ManureManagementCattleFeedlot => "manure-management-cattle-feedlot",
        ManureManagementOther => "manure-management-other",
        RiceCultivation => "rice-cultivation",
        SyntheticFertilizerApplication => "synthetic-fertilizer-application",
        OtherAgriculturalSoilEmissions => "other-agricultural-soil-emissions",
        ResidentialOnsiteFuelUsage => "residential-onsite-fuel-usage",
        NonResidentialOnsiteFuelUsage => "non-residential-onsite-fuel-usage",
        OtherOnsiteFuelUsage => "other-onsite-fuel-usage",
        FluorinatedGases => "fluorinated-gases",
        ForestLandClearing => "forest-land-clearing",
        ForestLandDegradation => "forest-land-degradation",
        ForestLandFires => "forest-land-fires",
        NetForestLand => "net-forest-land",
        NetShrubgrass => "net-shrubgrass",
        NetWetland => "net-wetland",
        Removals => "removals",
        ShrubgrassFires => "shrubgrass-fires",
        WaterReservoirs => "water-reservoirs",
        WetlandFires => "wetland-fires",
        CoalMining => "coal-mining",
        OilAndGasProduction => "oil-and-gas-production",
        OilAndGasRefining => "oil-and-gas-refining",
        OilAndGasTransport => "oil-and-gas-transport",
        OtherFossilFuelOperations => "other-fossil-fuel-operations",
        SolidFuelTransformation => "solid-fuel-transformation",
        Aluminum => "aluminum",
        Cement => "cement",
        Chemicals => "chemicals",
        FoodBeverageTobacco => "food-beverage-tobacco",
        Glass => "glass",
        IronAndSteel => "iron-and-steel",
        Lime => "lime",
        OtherChemicals => "other-chemicals",
        OtherManufacturing => "other-manufacturing",
        OtherMetals => "other-metals",
        PetrochemicalSteamCracking => "petrochemical-steam-cracking",
        PulpAndPaper => "pulp-and-paper",
        TextilesLeatherApparel => "textiles-leather-apparel",
        WoodAndWoodProducts => "wood-and-wood-products",
        BauxiteMining => "bauxite-mining",
        CopperMining => "copper-mining",
        IronMining => "iron-mining",
        RockQuarrying => "rock-quarrying",
        SandQuarrying => "sand-quarrying",
        ElectricityGeneration => "electricity-generation",
        HeatPlants => "heat-plants",
        OtherEnergyUse => "other-energy-use",
        DomesticAviation => "domestic-aviation",
        DomesticShipping => "domestic-shipping",
        InternationalAviation => "international-aviation",
        InternationalShipping => "international-shipping",
        OtherTransport => "other-transport",
        Railways => "railways",
        RoadTransportation => "road-transportation",
        BiologicalTreatmentOfSolidWasteAndBiogenic => "biological-treatment-of-solid-waste-and-biogenic",
        DomesticWastewaterTreatmentAndDischarge => "domestic-wastewater-treatment-and-discharge",
        IncinerationAndOpenBurningOfWaste => "incineration-and-open-burning-of-waste",
        IndustrialWastewaterTreatmentAndDischarge => "industrial-wastewater-treatment-and-discharge",
        SolidWasteDisposal => "solid-waste-disposal",
        EntericFermentation => "enteric-fermentation",
        ManureManagement => "manure-management",
        OilAndGasProductionAndTransport => "oil-and-gas-production-and-transport",
        Steel => "steel",
        WastewaterTreatmentAndDischarge => "wastewater-treatment-and-discharge",
        BiologicalTreatmentOfSolidWaste => "biological-treatment-of-solid-waste",
        OtherFossilFuelOperationsAndFlaring => "other-fossil-fuel-operations-and-flaring",
    }
}

impl Subsector {
    /// The sector this subsector belongs to
    pub fn sector(&self) -> Sector {
        match self {
            Self::CroplandFires
            | Self::EntericFermentationCattleFeedlot
            | Self::EntericFermentationCattlePasture
            | Self::EntericFermentationOther
            | Self::ManureLeftOnPastureCattle
            | Self::ManureManagementCattleFeedlot
            | Self::ManureManagementOther
            | Self::RiceCultivation
            | Self::SyntheticFertilizerApplication
            | Self::OtherAgriculturalSoilEmissions => Sector::Agriculture,
            Self::ResidentialOnsiteFuelUsage
            | Self::NonResidentialOnsiteFuelUsage
            | Self::OtherOnsiteFuelUsage => Sector::Buildings,
            Self::FluorinatedGases => Sector::FluorinatedGases,
            Self::ForestLandClearing
            | Self::ForestLandDegradation
            | Self::ForestLandFires
            | Self::NetForestLand
            | Self::NetShrubgrass
            | Self::NetWetland
            | Self::Removals
            | Self::ShrubgrassFires
            | Self::WaterReservoirs
            | Self::WetlandFires => Sector::ForestryAndLandUse,
            Self::CoalMining
            | Self::OilAndGasProduction
            | Self::OilAndGasRefining
            | Self::OilAndGasTransport
            | Self::OtherFossilFuelOperations
            | Self::SolidFuelTransformation => Sector::FossilFuelOperations,
            Self::Aluminum
            | Self::Cement
            | Self::Chemicals
            | Self::FoodBeverageTobacco
            | Self::Glass
            | Self::IronAndSteel
            | Self::Lime
            | Self::OtherChemicals
            | Self::OtherManufacturing
            | Self::OtherMetals
            | Self::PetrochemicalSteamCracking
            | Self::PulpAndPaper
            | Self::TextilesLeatherApparel
            | Self::WoodAndWoodProducts => Sector::Manufacturing,
            Self::BauxiteMining
            | Self::CopperMining
            | Self::IronMining
            | Self::RockQuarrying
            | Self::SandQuarrying => Sector::MineralExtraction,
            Self::ElectricityGeneration
            | Self::HeatPlants
            | Self::OtherEnergyUse => Sector::Power,
            Self::DomesticAviation
            | Self::DomesticShipping
            | Self::InternationalAviation
            | Self::InternationalShipping
            | Self::OtherTransport
            | Self::Railways
            | Self::RoadTransportation => Sector::Transportation,
            Self::BiologicalTreatmentOfSolidWasteAndBiogenic
            | Self::DomesticWastewaterTreatmentAndDischarge
            | Self::IncinerationAndOpenBurningOfWaste
            | Self::IndustrialWastewaterTreatmentAndDischarge
            | Self::SolidWasteDisposal => Sector::Waste,
        }
    }
}
