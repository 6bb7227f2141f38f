use common::shapes::Aabb;
use nalgebra::Vector2;
use rand::prelude::*;
use simulation::config::SpringParams;
use simulation::entity::{Entity, EntityKind};
use simulation::lifecycle::{random_spawn_position, spawn_enemy, trigger_destruction, PairOutcome};
use simulation::movement::field_impulse;
use simulation::physics::{rebuild_index, resolve_collisions};
use simulation::render::FpsCounter;
use simulation::spring::animate_springs;
use simulation::theme::{ENEMY_SLOT, SPIKE_SLOT};
use simulation::vfx::AttractionVfx;
use simulation::*;
use quadtree::QuadTree;
use std::cell::{Cell, RefCell};

const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct Keys {
    down: Vec<Action>,
    pressed: Vec<Action>,
}

impl InputState for Keys {
    fn is_down(&self, action: Action) -> bool {
        self.down.contains(&action)
    }

    fn was_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}

#[derive(Default)]
struct Sounds {
    spawns: Cell<u32>,
    bounces: RefCell<Vec<f32>>,
}

impl SoundSink for Sounds {
    fn play_spawn(&self) {
        self.spawns.set(self.spawns.get() + 1);
    }

    fn play_bounce(&self, speed: f32) {
        self.bounces.borrow_mut().push(speed);
    }
}

#[derive(Default)]
struct Recorder {
    circles: usize,
    outlines: usize,
    rects: usize,
    texts: Vec<String>,
}

impl Renderer for Recorder {
    fn fill_circle(&mut self, _center: Vector2<f32>, _radius: f32, _color: Color) {
        self.circles += 1;
    }

    fn circle_outline(&mut self, _center: Vector2<f32>, _radius: f32, _color: Color) {
        self.outlines += 1;
    }

    fn rect_outline(&mut self, _bounds: Aabb, _thickness: f32, _color: Color) {
        self.rects += 1;
    }

    fn text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _color: Color) {
        self.texts.push(text.to_string());
    }
}

struct Harness {
    world: World,
    sounds: Sounds,
    rng: StdRng,
    viewport: Viewport,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    fn with_config(config: SimConfig) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        Harness {
            world: World::new(config, ThemeSet::default()),
            sounds: Sounds::default(),
            rng: StdRng::seed_from_u64(42),
            viewport,
        }
    }

    fn step(&mut self, keys: &Keys) -> StepReport {
        let mut frame = Frame {
            dt: DT,
            viewport: self.viewport,
            input: keys,
            rng: &mut self.rng,
            sound: &self.sounds,
        };
        self.world.step(&mut frame)
    }

    /// Grown-up enemy that keeps its heading and velocity.
    fn place_enemy(&mut self, x: f32, y: f32, vx: f32, vy: f32, tags: Tags) -> EntityId {
        let id = self.world.spawn_enemy_at(Vector2::new(x, y), &self.sounds);
        let enemy = self.world.store_mut().get_mut(id).unwrap();
        enemy.spring = None;
        enemy.radius = 15.0;
        enemy.heading_set = true;
        enemy.velocity = Vector2::new(vx, vy);
        enemy.tags = tags;
        id
    }

    fn entity(&self, id: EntityId) -> &Entity {
        self.world.store().get(id).unwrap()
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_spring_settles_on_target() {
    let params = SpringParams {
        stiffness: 700.0,
        damping: 0.00001,
    };
    let mut spring = Spring::new(0.0, 15.0, params);
    let mut settled = false;
    for _ in 0..1000 {
        if spring.step(DT) {
            settled = true;
            break;
        }
    }
    assert!(settled);
    assert_eq!(spring.current, 15.0);
    assert_eq!(spring.velocity, 0.0);
}

#[test]
fn test_spawned_enemy_grows_then_detaches() {
    let config = SimConfig::default();
    let sounds = Sounds::default();
    let mut store = EntityStore::new();
    let id = spawn_enemy(&mut store, &config, Vector2::new(100.0, 100.0), 1, &sounds);

    assert_eq!(sounds.spawns.get(), 1);
    let enemy = store.get(id).unwrap();
    assert!(approx(enemy.radius, 4.5));
    assert!(enemy.tags.is_destructible());
    assert!(!enemy.tags.is_lethal());
    assert_eq!(enemy.color_slot, ENEMY_SLOT);

    for _ in 0..1000 {
        animate_springs(&mut store, DT);
        if store.get(id).unwrap().spring.is_none() {
            break;
        }
    }
    let enemy = store.get(id).unwrap();
    assert!(enemy.spring.is_none());
    assert_eq!(enemy.radius, 15.0);
}

#[test]
fn test_every_fifth_spawn_is_a_spike() {
    let mut h = Harness::new();
    let ids: Vec<EntityId> = (0..10)
        .map(|i| h.place_enemy(60.0 + 40.0 * i as f32, 60.0, 0.0, 0.0, Tags::NONE))
        .collect();
    let spikes: Vec<usize> = ids
        .iter()
        .enumerate()
        .filter(|&(_, &id)| h.entity(id).color_slot == SPIKE_SLOT)
        .map(|(i, _)| i + 1)
        .collect();
    assert_eq!(spikes, vec![5, 10]);
}

#[test]
fn test_collapse_removes_entity() {
    let config = SimConfig::default();
    let mut store = EntityStore::new();
    let mut enemy = Entity::new(EntityKind::Enemy, Vector2::new(50.0, 50.0), 15.0, ENEMY_SLOT);
    assert!(trigger_destruction(&mut enemy, &config));
    assert!(enemy.is_dying());
    assert!(!trigger_destruction(&mut enemy, &config));
    let id = store.insert(enemy);

    let mut removed = false;
    for _ in 0..1000 {
        let report = animate_springs(&mut store, DT);
        if let Some(entity) = store.get(id) {
            assert!(entity.radius >= 0.0);
        }
        if report.removed.contains(&id) {
            removed = true;
            break;
        }
    }
    assert!(removed);
    assert!(store.is_empty());
}

#[test]
fn test_zero_radius_is_not_destroyed_again() {
    let config = SimConfig::default();
    let mut enemy = Entity::new(EntityKind::Enemy, Vector2::zeros(), 0.0, ENEMY_SLOT);
    assert!(!trigger_destruction(&mut enemy, &config));
    assert!(enemy.spring.is_none());
}

#[test]
fn test_pair_classification() {
    let both = Tags::LETHAL | Tags::DESTRUCTIBLE;
    assert_eq!(PairOutcome::classify(both, both), PairOutcome::DestroyBoth);
    assert_eq!(
        PairOutcome::classify(both, Tags::DESTRUCTIBLE),
        PairOutcome::DestroySecond
    );
    assert_eq!(
        PairOutcome::classify(Tags::DESTRUCTIBLE, Tags::LETHAL),
        PairOutcome::DestroyFirst
    );
    assert_eq!(
        PairOutcome::classify(Tags::LETHAL, Tags::LETHAL),
        PairOutcome::Elastic
    );
    assert_eq!(
        PairOutcome::classify(Tags::DESTRUCTIBLE, Tags::DESTRUCTIBLE),
        PairOutcome::Elastic
    );
    assert_eq!(PairOutcome::classify(Tags::NONE, both), PairOutcome::Elastic);
    assert_eq!(PairOutcome::classify(Tags::LETHAL, both), PairOutcome::Elastic);
    assert_eq!(PairOutcome::classify(both, Tags::LETHAL), PairOutcome::Elastic);
}

#[test]
fn test_mutual_destruction() {
    let mut h = Harness::new();
    let spikes = Tags::LETHAL | Tags::DESTRUCTIBLE;
    let a = h.place_enemy(100.0, 100.0, 0.0, 0.0, spikes);
    let b = h.place_enemy(110.0, 100.0, 0.0, 0.0, spikes);

    let report = h.step(&Keys::default());
    assert_eq!(report.collisions.destroyed, 2);
    assert!(h.entity(a).is_dying());
    assert!(h.entity(b).is_dying());

    for _ in 0..1000 {
        h.step(&Keys::default());
        if !h.world.store().contains(a) && !h.world.store().contains(b) {
            break;
        }
    }
    assert!(!h.world.store().contains(a));
    assert!(!h.world.store().contains(b));
    assert_eq!(h.world.store().len(), 1);
    assert!(h.world.store().contains(h.world.player()));
}

#[test]
fn test_spike_destroys_mortal_only() {
    let mut h = Harness::new();
    let spike = h.place_enemy(100.0, 100.0, 0.0, 0.0, Tags::LETHAL | Tags::DESTRUCTIBLE);
    let mortal = h.place_enemy(120.0, 100.0, 0.0, 0.0, Tags::DESTRUCTIBLE);

    let report = h.step(&Keys::default());
    assert_eq!(report.collisions.destroyed, 1);
    assert!(!h.entity(spike).is_dying());
    assert!(h.entity(mortal).is_dying());
    // no elastic response on a lethal contact
    assert_eq!(h.entity(spike).position, Vector2::new(100.0, 100.0));
}

#[test]
fn test_head_on_elastic_bounce() {
    let mut h = Harness::new();
    let a = h.place_enemy(200.0, 200.0, 50.0, 0.0, Tags::DESTRUCTIBLE);
    let b = h.place_enemy(225.0, 200.0, -50.0, 0.0, Tags::DESTRUCTIBLE);

    let report = h.step(&Keys::default());
    assert_eq!(report.collisions.contacts, 1);
    assert_eq!(report.collisions.impulses, 1);
    assert!(approx(h.entity(a).velocity.x, -45.0));
    assert!(approx(h.entity(b).velocity.x, 45.0));
    let gap = (h.entity(b).position - h.entity(a).position).norm();
    assert!(approx(gap, 30.0));
}

#[test]
fn test_attract_mode_ignores_approaching_pair() {
    let mut h = Harness::new();
    h.world.set_mode(InteractionMode::Attract);
    let a = h.place_enemy(200.0, 200.0, 50.0, 0.0, Tags::DESTRUCTIBLE);
    let b = h.place_enemy(225.0, 200.0, -50.0, 0.0, Tags::DESTRUCTIBLE);

    let report = h.step(&Keys::default());
    assert_eq!(report.collisions.contacts, 1);
    assert_eq!(report.collisions.impulses, 0);
    assert_eq!(h.entity(a).velocity.x, 50.0);
    assert_eq!(h.entity(b).velocity.x, -50.0);
}

#[test]
fn test_wall_bounce_plays_sound() {
    let mut h = Harness::new();
    let id = h.place_enemy(16.0, 200.0, -120.0, 0.0, Tags::DESTRUCTIBLE);

    let report = h.step(&Keys::default());
    assert_eq!(report.bounces, 1);
    let enemy = h.entity(id);
    assert_eq!(enemy.position.x, 15.0);
    assert_eq!(enemy.velocity.x, 120.0);
    assert_eq!(*h.sounds.bounces.borrow(), vec![120.0]);
}

#[test]
fn test_spawn_key() {
    let mut h = Harness::new();
    let keys = Keys {
        pressed: vec![Action::Spawn],
        ..Default::default()
    };
    let report = h.step(&keys);
    let id = report.spawned.unwrap();
    assert_eq!(h.world.store().len(), 2);
    assert_eq!(h.sounds.spawns.get(), 1);
    let enemy = h.entity(id);
    assert_eq!(enemy.kind, EntityKind::Enemy);
    assert!(enemy.heading_set);
    assert!(enemy.spring.is_some());
    assert!(enemy.radius < 15.0);

    let report = h.step(&Keys::default());
    assert_eq!(report.spawned, None);
    assert_eq!(h.sounds.spawns.get(), 1);
}

#[test]
fn test_spawn_positions_respect_margin() {
    let viewport = Viewport::new(800, 450);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let p = random_spawn_position(&viewport, 50.0, &mut rng);
        assert!((50.0..=750.0).contains(&p.x));
        assert!((50.0..=400.0).contains(&p.y));
        assert_eq!(p.x.fract(), 0.0);
    }
}

#[test]
fn test_toggle_mode_and_theme() {
    let mut h = Harness::new();
    assert_eq!(h.world.mode(), InteractionMode::Repel);
    assert_eq!(h.world.theme().name, "Default");

    let keys = Keys {
        pressed: vec![Action::ToggleMode, Action::NextTheme],
        ..Default::default()
    };
    h.step(&keys);
    assert_eq!(h.world.mode(), InteractionMode::Attract);
    assert_eq!(h.world.theme().name, "Solarized Dark");

    h.step(&keys);
    h.step(&keys);
    assert_eq!(h.world.mode(), InteractionMode::Attract);
    assert_eq!(h.world.theme().name, "Default");
}

#[test]
fn test_player_moves_with_arrows() {
    let mut h = Harness::new();
    let keys = Keys {
        down: vec![Action::MoveRight, Action::MoveDown],
        ..Default::default()
    };
    h.step(&keys);
    let player = h.entity(h.world.player());
    assert_eq!(player.velocity, Vector2::new(200.0, 200.0));
    assert!(approx(player.position.x, 400.0 + 200.0 * DT));
    assert!(approx(player.position.y, 225.0 + 200.0 * DT));

    h.step(&Keys::default());
    assert_eq!(h.entity(h.world.player()).velocity, Vector2::zeros());
}

#[test]
fn test_field_impulse() {
    let source = Vector2::new(0.0, 0.0);
    let pulled = field_impulse(
        Vector2::new(100.0, 0.0),
        source,
        200.0,
        300.0,
        InteractionMode::Attract,
        1.0,
    );
    assert!(approx(pulled.x, -150.0));
    assert!(approx(pulled.y, 0.0));

    let pushed = field_impulse(
        Vector2::new(100.0, 0.0),
        source,
        200.0,
        300.0,
        InteractionMode::Repel,
        1.0,
    );
    assert!(approx(pushed.x, 150.0));

    let outside = field_impulse(Vector2::new(250.0, 0.0), source, 200.0, 300.0, InteractionMode::Attract, 1.0);
    assert_eq!(outside, Vector2::zeros());
    let centred = field_impulse(source, source, 200.0, 300.0, InteractionMode::Attract, 1.0);
    assert_eq!(centred, Vector2::zeros());
}

#[test]
fn test_held_field_moves_enemies_and_opens_ring() {
    let mut h = Harness::new();
    h.world.set_mode(InteractionMode::Attract);
    let id = h.place_enemy(500.0, 225.0, 0.0, 0.0, Tags::DESTRUCTIBLE);
    let keys = Keys {
        down: vec![Action::Attract],
        ..Default::default()
    };
    h.step(&keys);
    assert!(h.entity(id).velocity.x < 0.0);
    assert!(h.world.vfx().is_visible());

    for _ in 0..200 {
        h.step(&Keys::default());
    }
    assert!(!h.world.vfx().is_visible());
}

#[test]
fn test_vfx_eases_and_snaps() {
    let mut vfx = AttractionVfx::default();
    vfx.update(true, 100.0);
    assert!(approx(vfx.current_radius, 15.0));
    for _ in 0..100 {
        vfx.update(true, 100.0);
    }
    assert_eq!(vfx.current_radius, 100.0);
    for _ in 0..100 {
        vfx.update(false, 100.0);
    }
    assert_eq!(vfx.current_radius, 0.0);
    assert!(!vfx.is_visible());
}

fn scattered_pairs(seed: u64) -> EntityStore {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = EntityStore::new();
    for k in 0..5 {
        let x = 80.0 + 150.0 * k as f32;
        for (dx, dy) in [(0.0, 0.0), (20.0, 6.0)] {
            let mut e = Entity::new(EntityKind::Enemy, Vector2::new(x + dx, 200.0 + dy), 15.0, ENEMY_SLOT);
            e.velocity = Vector2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
            e.tags = Tags::DESTRUCTIBLE;
            store.insert(e);
        }
        let loner = Entity::new(EntityKind::Enemy, Vector2::new(x, 380.0), 15.0, ENEMY_SLOT);
        store.insert(loner);
    }
    store
}

#[test]
fn test_broad_phases_agree() {
    let world = Aabb::from_size(800.0, 450.0);
    let mut results = Vec::new();
    for broad_phase in [BroadPhase::Quadtree, BroadPhase::AllPairs] {
        let config = SimConfig {
            broad_phase,
            ..Default::default()
        };
        let mut store = scattered_pairs(3);
        let mut tree = QuadTree::new(world);
        let mut pairs = Vec::new();
        let report = resolve_collisions(
            &mut store,
            &mut tree,
            &mut pairs,
            world,
            InteractionMode::Repel,
            &config,
        );
        assert_eq!(report.contacts, 5);
        let snapshot: Vec<(Vector2<f32>, Vector2<f32>)> = store
            .iter()
            .map(|(_, e)| (e.position, e.velocity))
            .collect();
        results.push(snapshot);
    }
    assert_eq!(results[0], results[1]);
}

fn enemy_row(xs: &[f32]) -> EntityStore {
    let mut store = EntityStore::new();
    for &x in xs {
        let mut e = Entity::new(EntityKind::Enemy, Vector2::new(x, 200.0), 15.0, ENEMY_SLOT);
        e.tags = Tags::DESTRUCTIBLE;
        store.insert(e);
    }
    store
}

fn resolve_with(broad_phase: BroadPhase, store: &mut EntityStore, world: Aabb) -> (CollisionReport, QuadTree) {
    let config = SimConfig {
        broad_phase,
        ..Default::default()
    };
    let mut tree = QuadTree::new(world);
    let mut pairs = Vec::new();
    let report = resolve_collisions(store, &mut tree, &mut pairs, world, InteractionMode::Repel, &config);
    (report, tree)
}

#[test]
fn test_pushed_body_meets_new_neighbour() {
    let world = Aabb::from_size(800.0, 450.0);
    let mut positions = Vec::new();
    for broad_phase in [BroadPhase::Quadtree, BroadPhase::AllPairs] {
        let mut store = enemy_row(&[100.0, 125.0, 157.0]);
        let (report, _) = resolve_with(broad_phase, &mut store, world);
        assert_eq!(report.contacts, 2);
        let xs: Vec<f32> = store.iter().map(|(_, e)| e.position.x).collect();
        positions.push(xs);
    }
    assert_eq!(positions[0], positions[1]);
    assert!(approx(positions[0][0], 97.5));
    assert!(approx(positions[0][1], 127.25));
    assert!(approx(positions[0][2], 157.25));
}

fn crowded_scene(seed: u64) -> EntityStore {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = EntityStore::new();
    for _ in 0..60 {
        let position = Vector2::new(rng.gen_range(250.0..550.0), rng.gen_range(75.0..375.0));
        let mut e = Entity::new(EntityKind::Enemy, position, 10.0, ENEMY_SLOT);
        e.velocity = Vector2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0));
        e.tags = if rng.gen_bool(0.2) {
            Tags::LETHAL | Tags::DESTRUCTIBLE
        } else {
            Tags::DESTRUCTIBLE
        };
        store.insert(e);
    }
    store
}

#[test]
fn test_broad_phases_agree_in_crowds() {
    let world = Aabb::from_size(800.0, 450.0);
    for seed in 0..4 {
        let mut tree_store = crowded_scene(seed);
        let (tree_report, tree) = resolve_with(BroadPhase::Quadtree, &mut tree_store, world);
        assert!(tree.node_count() > 1);
        assert_eq!(tree.dropped_entities(), 0);

        let mut scan_store = crowded_scene(seed);
        let (scan_report, _) = resolve_with(BroadPhase::AllPairs, &mut scan_store, world);

        assert!(scan_report.contacts > 0);
        assert_eq!(tree_report.contacts, scan_report.contacts);
        assert_eq!(tree_report.impulses, scan_report.impulses);
        assert_eq!(tree_report.destroyed, scan_report.destroyed);
        assert!(tree_report.candidates <= scan_report.candidates);
        for ((_, a), (_, b)) in tree_store.iter().zip(scan_store.iter()) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.velocity, b.velocity);
            assert_eq!(a.is_dying(), b.is_dying());
        }
    }
}

#[test]
fn test_rebuild_covers_escaped_entities() {
    let world = Aabb::from_size(800.0, 450.0);
    let mut store = crowded_scene(9);
    let mut escaped = Entity::new(EntityKind::Enemy, Vector2::new(900.0, -40.0), 15.0, ENEMY_SLOT);
    escaped.tags = Tags::DESTRUCTIBLE;
    let escaped = store.insert(escaped);

    let mut tree = QuadTree::new(world);
    rebuild_index(&mut tree, &store, world);
    assert!(tree.world_bounds().contains(&world));
    assert!(tree.world_bounds().contains(&Aabb::from_circle(900.0, -40.0, 15.0)));
    assert_eq!(tree.dropped_entities(), 0);
    let found = tree.query(Aabb::from_circle(900.0, -40.0, 15.0), usize::MAX);
    assert!(found.contains(&escaped.index()));
}

#[test]
fn test_render_counts() {
    let mut h = Harness::new();
    h.place_enemy(100.0, 100.0, 0.0, 0.0, Tags::DESTRUCTIBLE);
    h.place_enemy(300.0, 100.0, 0.0, 0.0, Tags::DESTRUCTIBLE);
    h.step(&Keys::default());

    let mut recorder = Recorder::default();
    h.world.render(&mut recorder);
    assert_eq!(recorder.circles, 3);
    assert_eq!(recorder.outlines, 0);
    assert_eq!(recorder.rects, 0);
    assert!(recorder.texts.contains(&"Default".to_string()));
    assert!(recorder.texts.contains(&"Mode: REPEL".to_string()));
    assert!(recorder.texts.iter().any(|t| t.starts_with("FPS: ")));

    h.world.set_debug_quadtree(true);
    let mut recorder = Recorder::default();
    h.world.render(&mut recorder);
    assert_eq!(recorder.rects, h.world.tree().node_count());
    assert!(recorder.texts.iter().any(|t| t.starts_with("Quadtree: ")));
}

#[test]
fn test_fps_counter() {
    let mut fps = FpsCounter::default();
    for _ in 0..3 {
        fps.tick(0.25);
    }
    assert_eq!(fps.fps(), 0);
    fps.tick(0.25);
    assert_eq!(fps.fps(), 4);
}

#[test]
fn test_audio_triggers_latch() {
    let audio = AudioTriggers::default();
    assert!(!audio.take_spawn());
    assert_eq!(audio.take_bounce(), None);

    audio.play_spawn();
    audio.play_bounce(3.0);
    audio.play_bounce(3.5);
    assert!(audio.take_spawn());
    assert!(!audio.take_spawn());
    assert_eq!(audio.take_bounce(), Some(3.5));
    assert_eq!(audio.take_bounce(), None);
}

#[test]
fn test_entity_store_reuses_slots() {
    let mut store = EntityStore::new();
    let make = |x: f32| Entity::new(EntityKind::Enemy, Vector2::new(x, 0.0), 1.0, ENEMY_SLOT);
    let a = store.insert(make(0.0));
    let b = store.insert(make(1.0));
    let c = store.insert(make(2.0));
    assert_eq!(store.len(), 3);

    assert!(store.remove(b).is_some());
    assert!(store.remove(b).is_none());
    assert_eq!(store.len(), 2);
    assert_eq!(store.id_at(b.index()), None);

    let d = store.insert(make(3.0));
    assert_eq!(d.index(), b.index());
    assert_eq!(store.get(d).unwrap().position.x, 3.0);

    assert!(store.pair_mut(a, a).is_none());
    let (first, second) = store.pair_mut(c, a).unwrap();
    assert_eq!(first.position.x, 2.0);
    assert_eq!(second.position.x, 0.0);
}

#[test]
fn test_viewport_zoom() {
    let mut viewport = Viewport::new(800, 450);
    assert_eq!(viewport.visible_world(), Aabb::new(0.0, 0.0, 800.0, 450.0));
    viewport.zoom = 2.0;
    assert_eq!(viewport.visible_world(), Aabb::new(200.0, 112.5, 600.0, 337.5));
    assert_eq!(viewport.to_screen(Vector2::new(600.0, 337.5)), Vector2::new(800.0, 450.0));
}

#[test]
fn test_config_validation() {
    assert!(SimConfig::default().validate().is_ok());

    let bad_restitution = SimConfig {
        restitution: 1.5,
        ..Default::default()
    };
    assert!(matches!(
        bad_restitution.validate(),
        Err(ConfigError::OutOfRange { field: "restitution", .. })
    ));

    let bad_viewport = SimConfig {
        viewport_width: 0,
        ..Default::default()
    };
    assert!(matches!(
        bad_viewport.validate(),
        Err(ConfigError::InvalidViewport { .. })
    ));

    let mut bad_tree = SimConfig::default();
    bad_tree.quadtree.node_capacity = 0;
    assert!(matches!(bad_tree.validate(), Err(ConfigError::Quadtree(_))));

    assert_eq!("all-pairs".parse::<BroadPhase>(), Ok(BroadPhase::AllPairs));
    assert_eq!("Quadtree".parse::<BroadPhase>(), Ok(BroadPhase::Quadtree));
    assert!("grid".parse::<BroadPhase>().is_err());
}
