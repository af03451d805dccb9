use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaundryService {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
}

pub const CATALOG: &[LaundryService] = &[
    LaundryService {
        id: "wash-fold",
        name: "Wash & Fold",
        description: "Everyday clothes washed, dried and neatly folded.",
        price: "49 / kg",
    },
    LaundryService {
        id: "dry-clean",
        name: "Dry Cleaning",
        description: "Gentle solvent cleaning for suits, sarees and delicates.",
        price: "from 149 / piece",
    },
    LaundryService {
        id: "steam-iron",
        name: "Steam Ironing",
        description: "Crisp, wrinkle-free garments pressed with steam.",
        price: "15 / piece",
    },
    LaundryService {
        id: "shoe-clean",
        name: "Shoe Cleaning",
        description: "Deep cleaning and deodorizing for sneakers and leather shoes.",
        price: "from 199 / pair",
    },
];

pub fn find_service(id: &str) -> Option<&'static LaundryService> {
    CATALOG.iter().find(|service| service.id == id)
}

#[function_component(Services)]
pub fn services() -> Html {
    html! {
        <div class="container">
            <h2>{ "Our Services" }</h2>
            <div class="service-grid">
                { for CATALOG.iter().map(|service| html! {
                    <div class="card" key={service.id}>
                        <h3>{ service.name }</h3>
                        <p>{ service.description }</p>
                        <p class="price">{ service.price }</p>
                        <Link<Route> to={Route::ServiceDetail { id: service.id.to_string() }}>
                            { "View details" }
                        </Link<Route>>
                    </div>
                })}
            </div>
        </div>
    }
}
