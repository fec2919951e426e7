use super::*;

/// Macro to hide the derive trait boilerplate
macro_rules! markers {
  ( $( $name:ident ),* ) => {
        $(
            #[derive(Component, Reflect, Clone, Default)]
            #[reflect(Component)]
            pub struct $name;
        )*
    };
}
pub(crate) use markers;

markers!(
    SceneCamera,
    // scene
    Pokeball,
    Lid,
    // UI: nodes or labels that change visibility or content at some point
    PortalUi,
    InstructionLabel,
    CatchButton,
    DebugPanel,
    // card
    CreatureCard,
    CardSprite,
    CardName,
    CardNumber,
    CardTypes,
    CardStats,
    CardTotal
);

macro_rules! timers {
  ( $( $name:ident ),* ) => {
        $(
            #[derive(Component, Reflect, Deref, DerefMut, Debug)]
            #[reflect(Component)]
            pub struct $name(pub Timer);
        )*
    };
}
timers!(FlashTimer, GlowTimer);
