//! Controlled Vocabularies
//!
//! Fixed tag sets used as membership tests by the rule engine. Each set is
//! declared once through `vocabulary!`, which generates the enum, its
//! member list and its wire tags from the same `Variant => "tag"` table.

/// A closed set of string tags.
pub trait Vocabulary: Sized + Copy + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Wire tag as it appears in RCIP documents.
    fn as_str(&self) -> &'static str;

    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == tag)
    }

    fn contains(tag: &str) -> bool {
        Self::from_tag(tag).is_some()
    }
}

macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Vocabulary for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $tag),+
                }
            }
        }
    };
}

vocabulary!(DietLabel {
    Vegetarian => "vegetarian",
    Vegan => "vegan",
    GlutenFree => "gluten-free",
    DairyFree => "dairy-free",
    NutFree => "nut-free",
    EggFree => "egg-free",
    SoyFree => "soy-free",
    FishFree => "fish-free",
    ShellfishFree => "shellfish-free",
    Kosher => "kosher",
    Halal => "halal",
    LowSodium => "low-sodium",
    LowCarb => "low-carb",
    Keto => "keto",
    Paleo => "paleo",
});

vocabulary!(
    /// Allergen disclosure tags. Membership is a hard error surface.
    Allergen {
        Milk => "milk",
        Eggs => "eggs",
        Fish => "fish",
        Shellfish => "shellfish",
        TreeNuts => "tree-nuts",
        Peanuts => "peanuts",
        Wheat => "wheat",
        Gluten => "gluten",
        Soybeans => "soybeans",
        Sesame => "sesame",
        Celery => "celery",
        Mustard => "mustard",
        Molluscs => "molluscs",
        Lupins => "lupins",
        Sulphites => "sulphites",
        Lactose => "lactose",
    }
);

vocabulary!(CookingAction {
    Add => "add",
    Mix => "mix",
    Combine => "combine",
    Blend => "blend",
    Cut => "cut",
    Slice => "slice",
    Dice => "dice",
    Chop => "chop",
    Mince => "mince",
    Heat => "heat",
    Boil => "boil",
    Simmer => "simmer",
    Steam => "steam",
    Fry => "fry",
    Saute => "saute",
    Bake => "bake",
    Roast => "roast",
    Grill => "grill",
    Cool => "cool",
    Chill => "chill",
    Freeze => "freeze",
    Knead => "knead",
    Fold => "fold",
    Roll => "roll",
    Shape => "shape",
    Ferment => "ferment",
    Proof => "proof",
    Rest => "rest",
    Strain => "strain",
    Filter => "filter",
    Separate => "separate",
    Measure => "measure",
    Weigh => "weigh",
    Wait => "wait",
    Dissolve => "dissolve",
    Prepare => "prepare",
    Spread => "spread",
    Garnish => "garnish",
    Divide => "divide",
});

vocabulary!(
    /// Measurement units for `machine_amount.unit`.
    Unit {
        Mg => "mg",
        G => "g",
        Kg => "kg",
        Oz => "oz",
        Lb => "lb",
        Ml => "ml",
        L => "l",
        Tsp => "tsp",
        Tbsp => "tbsp",
        Cup => "cup",
        FlOz => "fl-oz",
        Pt => "pt",
        Qt => "qt",
        Gal => "gal",
        Pcs => "pcs",
        Dozen => "dozen",
        Pinch => "pinch",
        Dash => "dash",
        Handful => "handful",
        ToTaste => "to-taste",
    }
);

vocabulary!(HazardTag {
    HotSurface => "hot-surface",
    SharpTool => "sharp-tool",
    Electrical => "electrical",
    Chemical => "chemical",
    Pressure => "pressure",
    AllergenCrossContact => "allergen-cross-contact",
});
