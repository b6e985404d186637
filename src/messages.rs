//! User-facing message text. Every failure shown to the operator is one of these.

pub const ORDER_SUCCESS: &str = "Compra realizada con éxito!";
pub const ORDER_VALIDATION: &str = "Hubo un problema con los datos del pedido.";
pub const ORDER_FAILED: &str = "Hubo un problema al realizar la compra. Por favor, intenta de nuevo.";
pub const ORDER_EMPTY: &str = "El carrito está vacío.";
pub const ORDER_IN_PROGRESS: &str = "La compra ya se está procesando.";
pub const ACCESS_DENIED: &str = "No tienes permiso para realizar esta acción.";

pub const LOGIN_INVALID: &str = "Verificar tu correo o contraseña.";
pub const LOGIN_FAILED: &str = "No se pudo iniciar sesión. Por favor, intenta de nuevo.";

pub const PRODUCT_EXISTS: &str = "El producto ya existe.";
pub const PRODUCT_VALIDATION: &str = "Error de validación en los datos ingresados.";
pub const PRODUCT_SAVE_FAILED: &str = "Ocurrió un error al guardar el producto.";
pub const PRODUCT_STATUS_FAILED: &str = "Ocurrió un error al actualizar el estado del producto.";
pub const PRODUCTS_LOAD_FAILED: &str = "Ocurrió un error al cargar los productos.";

pub const RESERVATION_NOT_FOUND: &str = "No se encontró la reserva. Verifica el DNI ingresado.";
pub const RESERVATION_SEARCH_FAILED: &str = "Ocurrió un error al buscar la reserva.";
pub const RESERVATION_STATUS_UPDATED: &str = "Estado de reserva actualizado exitosamente.";
pub const RESERVATION_STATUS_FAILED: &str = "Ocurrió un error al cambiar el estado de la reserva.";
pub const DELIVERY_DATE_UPDATED: &str = "Fecha de entrega actualizada exitosamente.";
pub const DELIVERY_DATE_FAILED: &str = "Ocurrió un error al actualizar la fecha de entrega.";
pub const RESERVATION_DELETE_FAILED: &str = "Ocurrió un error al eliminar la reserva.";
pub const RESERVATION_ITEMS_FAILED: &str = "Ocurrió un error al cargar los productos de la reserva.";
pub const ORDERS_LOAD_FAILED: &str = "Ocurrió un error al cargar los pedidos.";
pub const ORDER_DETAIL_FAILED: &str = "Ocurrió un error al cargar el detalle del pedido.";
pub const ORDER_STATUS_UPDATED: &str = "Estado del pedido actualizado exitosamente.";
pub const ORDER_STATUS_FAILED: &str = "Ocurrió un error al cambiar el estado del pedido.";

pub const NO_DATA: &str = "No hay datos disponibles";
pub const NAME_NOT_FOUND: &str = "Nombre no encontrado";
pub const ACTIVE: &str = "Activo";
pub const INACTIVE: &str = "Inactivo";
pub const ACTIONS_HEADER: &str = "Acciones";
