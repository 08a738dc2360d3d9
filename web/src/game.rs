use crate::host::*;
use crate::utils::*;
use memento_core as game;
use yew::prelude::*;

type WebGame = game::GameController<AssetCatalog, BoardSurface, AlertNotifier, TimeoutScheduler>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SlotClicked(game::SlotIndex),
    Deferred(game::DeferredTask),
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::SlotIndex,
    slot: SlotView,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::SlotIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use game::SlotStatus::*;

    let CardProps {
        index,
        slot,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "carte",
        match slot.status {
            Hidden => classes!(),
            Revealed => classes!("open"),
            Matched => classes!("open", "found"),
        }
    );
    if locked {
        class.push("locked");
    }

    let onclick = slot.clickable.then(|| {
        Callback::from(move |_: MouseEvent| {
            log::trace!("card {} clicked", index);
            callback.emit(index);
        })
    });

    html! {
        <img {class} src={slot.image_src().to_string()} alt="" {onclick}/>
    }
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct GameView {
    game: WebGame,
}

impl GameView {
    fn progress_label(&self) -> String {
        format!("{}/{}", self.game.pairs_found(), self.game.total_pairs())
    }

    fn state_class(&self) -> Classes {
        classes!(if self.game.is_complete() {
            "win"
        } else if self.game.is_input_locked() {
            "comparing"
        } else {
            "in-progress"
        })
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let catalog = AssetCatalog::default();
        let collaborators = game::Collaborators {
            registry: BoardSurface::new(catalog.slot_count()),
            catalog,
            notifier: AlertNotifier,
            scheduler: TimeoutScheduler::new(ctx.link().callback(Msg::Deferred)),
        };

        let mut game = game::GameController::new(game::GameConfig::default(), collaborators, seed);
        game.reset_game();
        Self { game }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            SlotClicked(index) => self.game.on_slot_clicked(index).has_update(),
            Deferred(task) => {
                log::debug!("deferred task fired: {:?}", task);
                self.game.run_deferred(task).has_update()
            }
            NewGame => {
                self.game.reset_game();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let locked = self.game.is_input_locked();
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <div class="memento">
                <nav>
                    <aside>{self.progress_label()}</aside>
                    <span><button class={self.state_class()} onclick={cb_new_game}/></span>
                </nav>
                <section class="board">
                    {
                        for self.game.registry().slots().iter().enumerate().map(|(index, slot)| {
                            let slot = slot.clone();
                            let callback = ctx.link().callback(Msg::SlotClicked);
                            html! {
                                <CardView {index} {slot} {locked} {callback}/>
                            }
                        })
                    }
                </section>
            </div>
        }
    }
}

