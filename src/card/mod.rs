//! The creature card: a fixed skeleton spawned with the portal screen, refilled and
//! replayed on every reveal.
use crate::{models::*, ui::*};
use bevy::{
    prelude::*,
    ui::{UiTransform, Val::*, Val2},
};
use std::f32::consts::PI;

mod present;
mod timeline;

pub use present::*;
pub use timeline::*;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::Portal), spawn_card)
        .add_systems(Update, animate_card.in_set(PortalSystems::Animate))
        .add_observer(on_creature_revealed)
        .add_observer(on_dismiss_card);
}

/// A creature was caught, show its card.
#[derive(Event, Debug, Clone)]
pub struct CreatureRevealed(pub CardView);

#[derive(Component, Debug, Clone, Default)]
pub enum CardAnim {
    #[default]
    Hidden,
    Revealing {
        elapsed: f32,
        timeline: RevealTimeline,
    },
    Shown,
    FadingOut(Timer),
}

impl CardAnim {
    fn progress(&self, target: RevealTarget) -> f32 {
        match self {
            CardAnim::Revealing { elapsed, timeline } => timeline.progress(target, *elapsed),
            CardAnim::Hidden => 0.0,
            _ => 1.0,
        }
    }

    /// Global opacity multiplier, drops to zero while fading out.
    fn fade(&self) -> f32 {
        match self {
            CardAnim::FadingOut(timer) => 1.0 - timer.fraction(),
            _ => 1.0,
        }
    }
}

/// Slides, scales or spins a node in as its step plays.
#[derive(Component, Debug, Clone, Copy)]
pub struct RevealMotion(pub RevealTarget);

/// Fades a node's colours in with its step. Keeps the resting colours to fade towards.
#[derive(Component, Debug, Clone, Copy)]
pub struct RevealFade {
    pub target: RevealTarget,
    pub base: Color,
    pub border: Option<Color>,
}

impl RevealFade {
    fn new(target: RevealTarget, base: Color) -> Self {
        Self {
            target,
            base,
            border: None,
        }
    }
}

/// Coloured part of a stat bar, grows to `fill` of the track.
#[derive(Component, Debug, Clone, Copy)]
pub struct StatBarFill {
    pub index: usize,
    pub fill: f32,
}

fn card_border(legendary: bool) -> Color {
    if legendary {
        LEGENDARY_GOLD
    } else {
        NEON_CYAN.with_alpha(0.3)
    }
}

fn spawn_card(mut commands: Commands) {
    commands.spawn((
        Name::new("Creature Card"),
        CreatureCard,
        DespawnOnExit(Screen::Portal),
        CardAnim::Hidden,
        Visibility::Hidden,
        GlobalZIndex(2),
        Node {
            position_type: PositionType::Absolute,
            width: Percent(86.0),
            left: Percent(7.0),
            bottom: Percent(13.0),
            padding: UiRect::all(Px(16.0)),
            flex_direction: FlexDirection::Column,
            row_gap: Px(8.0),
            border: UiRect::all(Px(2.0)),
            ..default()
        },
        BorderRadius::all(Px(16.0)),
        BackgroundColor(CARD_BG),
        BorderColor::all(card_border(false)),
        RevealMotion(RevealTarget::Card),
        RevealFade {
            border: Some(card_border(false)),
            ..RevealFade::new(RevealTarget::Card, CARD_BG)
        },
        Pickable::IGNORE,
        children![
            (
                Name::new("Card Header"),
                Node {
                    justify_content: JustifyContent::SpaceBetween,
                    align_items: AlignItems::Center,
                    ..default()
                },
                children![
                    (
                        CardName,
                        label("", 26.0, WHITE),
                        RevealMotion(RevealTarget::Name),
                        RevealFade::new(RevealTarget::Name, WHITE),
                    ),
                    (
                        CardNumber,
                        label("", 18.0, NEON_CYAN),
                        RevealMotion(RevealTarget::Number),
                        RevealFade::new(RevealTarget::Number, NEON_CYAN),
                    ),
                ],
            ),
            (
                CardSprite,
                Node {
                    width: Px(120.0),
                    height: Px(120.0),
                    align_self: AlignSelf::Center,
                    ..default()
                },
                ImageNode::default(),
                RevealMotion(RevealTarget::Sprite),
                RevealFade::new(RevealTarget::Sprite, WHITE),
            ),
            (
                CardTypes,
                Name::new("Type Badges"),
                Node {
                    justify_content: JustifyContent::Center,
                    column_gap: Px(8.0),
                    ..default()
                },
            ),
            (
                CardStats,
                Name::new("Stat Rows"),
                Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Px(6.0),
                    ..default()
                },
            ),
            (
                CardTotal,
                label("", 16.0, INSTRUCTION),
                Node {
                    align_self: AlignSelf::FlexEnd,
                    ..default()
                },
                RevealFade::new(RevealTarget::Card, INSTRUCTION),
            ),
        ],
    ));
}

fn type_badge(index: usize, badge: &TypeBadge) -> impl Bundle {
    let target = RevealTarget::Badge(index);
    (
        Name::new(format!("Badge {}", badge.label)),
        Node {
            padding: UiRect::axes(Px(12.0), Px(4.0)),
            ..default()
        },
        BorderRadius::all(Px(12.0)),
        BackgroundColor(badge.color),
        RevealMotion(target),
        RevealFade::new(target, badge.color),
        children![(
            label(badge.label.clone(), 14.0, WHITE),
            RevealFade::new(target, WHITE)
        )],
    )
}

fn stat_row(index: usize, row: &StatRow) -> impl Bundle {
    let target = RevealTarget::Row(index);
    (
        Name::new(format!("Stat {}", row.label)),
        Node {
            align_items: AlignItems::Center,
            column_gap: Px(8.0),
            ..default()
        },
        RevealMotion(target),
        children![
            (
                label(row.label, 13.0, INSTRUCTION),
                Node {
                    width: Px(36.0),
                    ..default()
                },
                RevealFade::new(target, INSTRUCTION),
            ),
            (
                Name::new("Bar Track"),
                Node {
                    flex_grow: 1.0,
                    height: Px(8.0),
                    ..default()
                },
                BorderRadius::all(Px(4.0)),
                BackgroundColor(BAR_TRACK),
                RevealFade::new(target, BAR_TRACK),
                children![(
                    Name::new("Bar Fill"),
                    Node {
                        width: Percent(0.0),
                        height: Percent(100.0),
                        ..default()
                    },
                    BorderRadius::all(Px(4.0)),
                    BackgroundColor(row.color),
                    RevealFade::new(target, row.color),
                    StatBarFill {
                        index,
                        fill: row.fill,
                    },
                )],
            ),
            (
                label(row.value.to_string(), 13.0, WHITE),
                Node {
                    width: Px(32.0),
                    justify_content: JustifyContent::FlexEnd,
                    ..default()
                },
                RevealFade::new(target, WHITE),
            ),
        ],
    )
}

fn on_creature_revealed(
    revealed: On<CreatureRevealed>,
    asset_server: Res<AssetServer>,
    card: Single<(&mut CardAnim, &mut RevealFade), With<CreatureCard>>,
    sprite: Single<(&mut ImageNode, &mut Visibility), With<CardSprite>>,
    types: Single<Entity, With<CardTypes>>,
    stats: Single<Entity, With<CardStats>>,
    mut texts: ParamSet<(
        Query<&mut Text, With<CardName>>,
        Query<&mut Text, With<CardNumber>>,
        Query<&mut Text, With<CardTotal>>,
    )>,
    mut commands: Commands,
) {
    let view = &revealed.0;

    for mut t in texts.p0().iter_mut() {
        t.0 = view.name.clone();
    }
    for mut t in texts.p1().iter_mut() {
        t.0 = view.number.clone();
    }
    for mut t in texts.p2().iter_mut() {
        t.0 = view.total_label();
    }

    let (mut image, mut visibility) = sprite.into_inner();
    match &view.sprite_url {
        Some(url) => {
            image.image = asset_server.load(url.clone());
            *visibility = Visibility::Inherited;
        }
        None => {
            warn!("{} has no sprite", view.number);
            *visibility = Visibility::Hidden;
        }
    }

    commands.replace_children(
        *types,
        view.types
            .iter()
            .enumerate()
            .map(|(i, badge)| type_badge(i, badge)),
    );
    commands.replace_children(
        *stats,
        view.rows.iter().enumerate().map(|(i, row)| stat_row(i, row)),
    );

    let (mut anim, mut fade) = card.into_inner();
    fade.border = Some(card_border(view.legendary));
    *anim = CardAnim::Revealing {
        elapsed: 0.0,
        timeline: RevealTimeline::for_card(view.types.len(), view.rows.len()),
    };
}

fn on_dismiss_card(
    _: On<DismissCard>,
    config: Option<Res<Config>>,
    mut card: Query<&mut CardAnim, With<CreatureCard>>,
) {
    let seconds = config.map_or(0.3, |c| c.timings.card_fade);
    for mut anim in card.iter_mut() {
        if !matches!(*anim, CardAnim::Hidden) {
            *anim = CardAnim::FadingOut(Timer::from_seconds(seconds, TimerMode::Once));
        }
    }
}

/// Offset, scale and rotation of a part at `p` progress into its step.
fn motion(target: RevealTarget, p: f32) -> UiTransform {
    let inv = 1.0 - p;
    let (translation, scale, rotation) = match target {
        RevealTarget::Card => (Val2::px(0.0, 50.0 * inv), 0.8 + 0.2 * p, 0.0),
        RevealTarget::Sprite => (Val2::ZERO, p, -PI * inv),
        RevealTarget::Name => (Val2::px(-30.0 * inv, 0.0), 1.0, 0.0),
        RevealTarget::Number => (Val2::px(30.0 * inv, 0.0), 1.0, 0.0),
        RevealTarget::Badge(_) => (Val2::px(0.0, 20.0 * inv), p, 0.0),
        RevealTarget::Row(_) => (Val2::px(-20.0 * inv, 0.0), 1.0, 0.0),
        RevealTarget::Bar(_) => (Val2::ZERO, 1.0, 0.0),
    };
    UiTransform {
        translation,
        scale: Vec2::splat(scale.max(0.0)),
        rotation: Rot2::radians(rotation),
    }
}

/// The card drifts up and shrinks while it fades out.
fn fade_out_motion(t: f32) -> UiTransform {
    UiTransform {
        translation: Val2::px(0.0, -30.0 * t),
        scale: Vec2::splat(1.0 - 0.2 * t),
        rotation: Rot2::IDENTITY,
    }
}

fn animate_card(
    time: Res<Time>,
    mut card: Query<(&mut CardAnim, &mut Visibility), With<CreatureCard>>,
    mut motions: Query<(&RevealMotion, &mut UiTransform)>,
    mut fades: Query<(
        &RevealFade,
        Option<&mut TextColor>,
        Option<&mut BackgroundColor>,
        Option<&mut ImageNode>,
        Option<&mut BorderColor>,
    )>,
    mut bars: Query<(&StatBarFill, &mut Node)>,
) {
    let Ok((mut anim, mut visibility)) = card.single_mut() else {
        return;
    };
    if matches!(*anim, CardAnim::Hidden | CardAnim::Shown) && !anim.is_changed() {
        return;
    }

    let next = match &mut *anim {
        CardAnim::Revealing { elapsed, timeline } => {
            *elapsed += time.delta_secs();
            timeline.is_finished(*elapsed).then_some(CardAnim::Shown)
        }
        CardAnim::FadingOut(timer) => timer
            .tick(time.delta())
            .is_finished()
            .then_some(CardAnim::Hidden),
        CardAnim::Hidden | CardAnim::Shown => None,
    };
    if let Some(next) = next {
        *anim = next;
    }

    let fading = match &*anim {
        CardAnim::FadingOut(timer) => Some(timer.fraction()),
        _ => None,
    };
    for (part, mut transform) in motions.iter_mut() {
        *transform = match (part.0, fading) {
            (RevealTarget::Card, Some(t)) => fade_out_motion(t),
            (target, _) => motion(target, anim.progress(target)),
        };
    }

    let fade = anim.fade();
    for (part, text, bg, image, border) in fades.iter_mut() {
        let alpha = anim.progress(part.target).clamp(0.0, 1.0) * fade;
        if let Some(mut c) = text {
            c.0 = part.base.faded(alpha);
        }
        if let Some(mut c) = bg {
            c.0 = part.base.faded(alpha);
        }
        if let Some(mut image) = image {
            image.color = part.base.faded(alpha);
        }
        if let (Some(mut b), Some(color)) = (border, part.border) {
            *b = BorderColor::all(color.faded(alpha));
        }
    }

    for (bar, mut node) in bars.iter_mut() {
        let p = anim.progress(RevealTarget::Bar(bar.index)).clamp(0.0, 1.0);
        node.width = Percent(100.0 * bar.fill * p);
    }

    *visibility = match *anim {
        CardAnim::Hidden => Visibility::Hidden,
        _ => Visibility::Inherited,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{Catalog, CreatureRecord, CreatureSource, FetchError, fixtures::bulbasaur},
        sequencer,
    };
    use bevy::{tasks::BoxedFuture, time::TimeUpdateStrategy};
    use std::time::Duration;

    #[test]
    fn hidden_card_shows_nothing_and_shown_card_everything() {
        assert_eq!(CardAnim::Hidden.progress(RevealTarget::Bar(0)), 0.0);
        assert_eq!(CardAnim::Shown.progress(RevealTarget::Bar(0)), 1.0);
        assert_eq!(CardAnim::Shown.fade(), 1.0);
    }

    #[test]
    fn fade_out_runs_alpha_down() {
        let mut timer = Timer::from_seconds(0.3, TimerMode::Once);
        timer.tick(Duration::from_millis(150));
        let anim = CardAnim::FadingOut(timer);
        assert!((anim.fade() - 0.5).abs() < 1e-3);
        assert_eq!(anim.progress(RevealTarget::Name), 1.0);
    }

    #[test]
    fn parts_rest_at_identity_when_done() {
        for target in [
            RevealTarget::Card,
            RevealTarget::Sprite,
            RevealTarget::Name,
            RevealTarget::Badge(1),
            RevealTarget::Row(4),
        ] {
            let t = motion(target, 1.0);
            assert_eq!(t.translation, Val2::px(0.0, 0.0), "{target:?}");
            assert_eq!(t.scale, Vec2::ONE, "{target:?}");
        }
        assert_eq!(motion(RevealTarget::Sprite, 0.0).scale, Vec2::ZERO);
    }

    struct Canned(Result<CreatureRecord, FetchError>);

    impl CreatureSource for Canned {
        fn fetch(&self, _: u32) -> BoxedFuture<'static, Result<CreatureRecord, FetchError>> {
            Box::pin(std::future::ready(self.0.clone()))
        }
    }

    /// Bulbasaur without sprites, so the reveal never reaches for the network.
    fn spriteless() -> CreatureRecord {
        CreatureRecord {
            artwork_url: None,
            sprite_url: None,
            ..bulbasaur()
        }
    }

    fn app(result: Result<CreatureRecord, FetchError>) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
            .insert_resource(Config::default())
            .insert_resource(Catalog::new(Canned(result)))
            .add_plugins((plugin, sequencer::plugin))
            .add_systems(Startup, spawn_card);
        app.update();
        app
    }

    fn catch(app: &mut App) {
        app.world_mut().trigger(CatchRequested);
        app.update();
    }

    fn card(app: &mut App) -> (CardAnim, Visibility) {
        let world = app.world_mut();
        let mut card = world.query_filtered::<(&CardAnim, &Visibility), With<CreatureCard>>();
        let (anim, visibility) = card.single(world).expect("one card");
        (anim.clone(), *visibility)
    }

    fn run_until(app: &mut App, done: impl Fn(&CardAnim) -> bool) {
        for _ in 0..400 {
            if done(&card(app).0) {
                return;
            }
            app.update();
            std::thread::sleep(Duration::from_millis(1));
        }
        panic!("card never reached the expected state");
    }

    fn idle(app: &App) -> bool {
        !app.world().resource::<sequencer::InteractionState>().is_busy()
    }

    #[test]
    fn failed_catch_leaves_card_hidden() {
        let mut app = app(Err(FetchError::Status(503)));
        catch(&mut app);
        for _ in 0..400 {
            if idle(&app) {
                break;
            }
            let (anim, visibility) = card(&mut app);
            assert!(matches!(anim, CardAnim::Hidden), "{anim:?}");
            assert_eq!(visibility, Visibility::Hidden);
            app.update();
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(idle(&app));
        let (anim, visibility) = card(&mut app);
        assert!(matches!(anim, CardAnim::Hidden));
        assert_eq!(visibility, Visibility::Hidden);
    }

    #[test]
    fn reveal_fills_bars_then_next_catch_fades_it_out() {
        let mut app = app(Ok(spriteless()));
        catch(&mut app);
        run_until(&mut app, |anim| matches!(anim, CardAnim::Shown));
        assert_eq!(card(&mut app).1, Visibility::Inherited);

        let world = app.world_mut();
        let mut bars = world.query::<(&StatBarFill, &Node)>();
        let bars: Vec<_> = bars
            .iter(world)
            .map(|(bar, node)| (bar.fill, node.width))
            .collect();
        assert_eq!(bars.len(), 6);
        for (fill, width) in bars {
            let Percent(width) = width else {
                panic!("bar width should be a percentage, got {width:?}");
            };
            assert!((width - fill * 100.0).abs() < 1e-3, "{width} vs {fill}");
        }

        while !idle(&app) {
            app.update();
        }
        catch(&mut app);
        let (anim, visibility) = card(&mut app);
        assert!(matches!(anim, CardAnim::FadingOut(_)), "{anim:?}");
        assert_eq!(visibility, Visibility::Inherited);

        run_until(&mut app, |anim| matches!(anim, CardAnim::Hidden));
        assert_eq!(card(&mut app).1, Visibility::Hidden);
    }
}
