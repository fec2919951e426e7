//! The catch flow: shake, open, flash, fetch, reveal, close.
//!
//! [`InteractionState`] decides what happens and when. The systems here only
//! translate its [`Cue`]s into events for the scene, card, particles and effects.
use crate::{
    card::{CardView, CreatureRevealed},
    catalog::{Catalog, CreatureRecord, FetchError, LegendarySet, pick_random_id},
    models::*,
};
use bevy::{
    prelude::*,
    tasks::{IoTaskPool, Task, block_on, futures_lite::future},
};

mod machine;

pub use machine::*;

pub const PROMPT: &str = "Click the Pokéball to open a dimensional rift";
pub const OPENING: &str = "Opening dimensional rift...";
pub const SUCCESS: &str = "Pokémon materialized successfully!";
pub const LEGENDARY: &str = "~ LEGENDARY POKÉMON DISCOVERED! ~";
pub const FAILURE: &str = "Dimensional rift unstable. Try again.";

pub fn plugin(app: &mut App) {
    app.init_resource::<InteractionState>()
        .init_resource::<Instruction>()
        .init_resource::<Showcase>()
        .add_systems(Update, drive_sequence.in_set(PortalSystems::Sequence))
        .add_observer(on_catch_requested);
}

/// Text of the instruction line under the ball.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Deref)]
pub struct Instruction(pub String);

impl Default for Instruction {
    fn default() -> Self {
        Self(PROMPT.to_string())
    }
}

impl Instruction {
    pub fn set(&mut self, text: &str) {
        self.0 = text.to_string();
    }
}

/// The last creature caught and whether its card is on screen.
#[derive(Resource, Debug, Clone, Default)]
pub struct Showcase {
    pub record: Option<CreatureRecord>,
    pub visible: bool,
}

#[derive(Resource)]
struct PendingFetch(Task<Result<CreatureRecord, FetchError>>);

fn on_catch_requested(
    _: On<CatchRequested>,
    config: Option<Res<Config>>,
    mut state: ResMut<InteractionState>,
    mut instruction: ResMut<Instruction>,
    mut showcase: ResMut<Showcase>,
    mut commands: Commands,
) {
    let Some(config) = config else {
        debug!("catch ignored, config is not loaded yet");
        return;
    };
    if !state.begin(&config.timings) {
        debug!("catch ignored, {:?} is still running", state.phase());
        return;
    }

    info!("opening the rift");
    if showcase.visible {
        showcase.visible = false;
        commands.trigger(DismissCard);
    }
    instruction.set(OPENING);
    commands.trigger(ShakeBall);
}

fn drive_sequence(
    time: Res<Time>,
    catalog: Option<Res<Catalog>>,
    legendary: Option<Res<LegendarySet>>,
    config: Option<Res<Config>>,
    mut pending: Option<ResMut<PendingFetch>>,
    mut state: ResMut<InteractionState>,
    mut instruction: ResMut<Instruction>,
    mut showcase: ResMut<Showcase>,
    mut commands: Commands,
) {
    if !state.is_busy() {
        return;
    }

    if let Some(PendingFetch(task)) = pending.as_deref_mut() {
        if let Some(result) = block_on(future::poll_once(task)) {
            commands.remove_resource::<PendingFetch>();
            state.resolve(result);
        }
    }

    for cue in state.advance(time.delta()) {
        match cue {
            Cue::Open => {
                commands.trigger(SetBallPose(BallPose::Open));
                commands.trigger(PortalGlow);
                commands.trigger(ScreenFlash);
            }
            Cue::Fetch => {
                let size = config
                    .as_deref()
                    .map_or(CatalogPreset::SIZE, |c| c.catalog.size);
                let id = pick_random_id(&mut rand::rng(), size);
                match catalog.as_deref() {
                    Some(catalog) => {
                        debug!("fetching creature #{id}");
                        let task = IoTaskPool::get().spawn(catalog.fetch(id));
                        commands.insert_resource(PendingFetch(task));
                    }
                    None => state.resolve(Err(FetchError::Transport(
                        "no catalog configured".to_string(),
                    ))),
                }
            }
            Cue::Reveal(record) => {
                let none = LegendarySet::default();
                let legendary = legendary.as_deref().unwrap_or(&none);
                let view = CardView::from_record(&record, legendary);
                info!("caught {} {}", view.number, view.name);

                instruction.set(if view.legendary { LEGENDARY } else { SUCCESS });
                commands.trigger(TypeThemeChanged(record.primary_type().to_string()));
                if view.legendary {
                    commands.trigger(ShakeScreen(1.0));
                    commands.trigger(LegendaryBurst);
                }
                commands.trigger(CreatureRevealed(view));
                showcase.record = Some(record);
                showcase.visible = true;
            }
            Cue::Fail(err) => {
                warn!("catch failed: {err}");
                instruction.set(FAILURE);
                commands.trigger(InstructionAlert);
            }
            Cue::Close => commands.trigger(SetBallPose(BallPose::Closed)),
            Cue::Idle => debug!("rift closed, ready for the next catch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CreatureSource, fixtures::bulbasaur};
    use bevy::{tasks::BoxedFuture, time::TimeUpdateStrategy};
    use std::time::Duration;

    struct Fixed(Result<CreatureRecord, FetchError>);

    impl CreatureSource for Fixed {
        fn fetch(&self, _: u32) -> BoxedFuture<'static, Result<CreatureRecord, FetchError>> {
            Box::pin(std::future::ready(self.0.clone()))
        }
    }

    fn app(source: Fixed, legendary: &[u32]) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
            .insert_resource(Config::default())
            .insert_resource(Catalog::new(source))
            .insert_resource(legendary.iter().copied().collect::<LegendarySet>())
            .add_plugins(plugin);
        app.update();
        app
    }

    fn catch(app: &mut App) {
        app.world_mut().trigger(CatchRequested);
        app.update();
    }

    /// Steps frames until `done` holds, polling the io pool in between.
    fn run_until(app: &mut App, done: impl Fn(&World) -> bool) {
        for _ in 0..400 {
            if done(app.world()) {
                return;
            }
            app.update();
            std::thread::sleep(Duration::from_millis(1));
        }
        panic!("sequence never reached the expected state");
    }

    fn busy(world: &World) -> bool {
        world.resource::<InteractionState>().is_busy()
    }

    #[test]
    fn successful_catch_shows_card_and_releases_busy() {
        let mut app = app(Fixed(Ok(bulbasaur())), &[150]);
        catch(&mut app);
        assert!(busy(app.world()));
        assert_eq!(app.world().resource::<Instruction>().0, OPENING);

        run_until(&mut app, |w| !busy(w));

        let showcase = app.world().resource::<Showcase>();
        assert_eq!(showcase.record, Some(bulbasaur()));
        assert!(showcase.visible);
        assert_eq!(app.world().resource::<Instruction>().0, SUCCESS);
    }

    #[test]
    fn legendary_catch_uses_legendary_message() {
        let mut app = app(Fixed(Ok(bulbasaur())), &[1]);
        catch(&mut app);
        run_until(&mut app, |w| !busy(w));
        assert_eq!(app.world().resource::<Instruction>().0, LEGENDARY);
    }

    #[test]
    fn failed_catch_keeps_card_hidden_and_releases_busy() {
        let mut app = app(Fixed(Err(FetchError::Status(503))), &[]);
        catch(&mut app);
        run_until(&mut app, |w| w.resource::<InteractionState>().phase() == Phase::Closing);
        assert!(busy(app.world()), "lid stays open through the close delay");

        run_until(&mut app, |w| !busy(w));
        let showcase = app.world().resource::<Showcase>();
        assert_eq!(showcase.record, None);
        assert!(!showcase.visible);
        assert_eq!(app.world().resource::<Instruction>().0, FAILURE);
    }

    #[test]
    fn catch_while_busy_changes_nothing() {
        let mut app = app(Fixed(Ok(bulbasaur())), &[]);
        catch(&mut app);
        run_until(&mut app, |w| {
            w.resource::<InteractionState>().phase() == Phase::Revealing
        });
        let before = app.world().resource::<Instruction>().clone();

        catch(&mut app);
        assert_eq!(*app.world().resource::<Instruction>(), before);
        assert_eq!(app.world().resource::<Showcase>().record, Some(bulbasaur()));
        assert!(app.world().resource::<Showcase>().visible);

        run_until(&mut app, |w| !busy(w));
        catch(&mut app);
        assert!(busy(app.world()), "a new attempt starts once idle");
        assert!(!app.world().resource::<Showcase>().visible);
    }
}
